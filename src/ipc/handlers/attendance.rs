use crate::attendance::{AttendanceError, AttendanceSession, SessionSlot};
use crate::db::{self, SqliteSubmissionSink};
use crate::history;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{
    get_optional_str, get_required_str, get_slot, get_status, require_db, require_teacher,
    require_viewer,
};
use crate::ipc::notices::NoticeLog;
use crate::ipc::types::{AppState, Request};
use crate::viewer::Viewer;
use chrono::NaiveDate;
use serde_json::{json, Value};

fn no_session() -> HandlerErr {
    HandlerErr::new(
        "no_attendance_session",
        "open attendance for a class and date first",
    )
}

fn parse_date(raw: &str) -> Result<NaiveDate, HandlerErr> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        HandlerErr::bad_params("date must be YYYY-MM-DD").with_details(json!({ "date": raw }))
    })
}

/// Domain failure plus whatever the user was told about it.
fn failed(e: AttendanceError, notices: &NoticeLog) -> HandlerErr {
    let mut he = HandlerErr::from(e);
    let mut details = he.details.take().unwrap_or_else(|| json!({}));
    details["notices"] = notices.to_json();
    he.with_details(details)
}

fn sheet_json(session: &AttendanceSession, slot: SessionSlot, query: &str) -> Value {
    let rows: Vec<Value> = session
        .search(query)
        .into_iter()
        .map(|s| {
            json!({
                "studentId": s.id,
                "name": s.name,
                "rollNo": s.roll_no,
                "status": session.status_of(&s.id, slot),
            })
        })
        .collect();
    let missing: Vec<&str> = session
        .missing(slot)
        .into_iter()
        .map(|s| s.roll_no.as_str())
        .collect();
    json!({
        "classId": session.class_id(),
        "date": session.date().format("%Y-%m-%d").to_string(),
        "session": slot,
        "complete": session.is_complete(slot),
        "tally": session.tally(slot),
        "missing": missing,
        "rows": rows,
    })
}

fn attendance_open(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let date = parse_date(&get_required_str(params, "date")?)?;
    let slot = get_slot(params, SessionSlot::Morning)?;

    let teacher = require_teacher(&state.viewer)?;
    let conn = require_db(&state.db)?;
    if !db::class_exists(conn, &class_id).map_err(|e| HandlerErr::db("db_query_failed", e))? {
        return Err(HandlerErr::new("not_found", "class not found"));
    }
    let roster =
        db::roster_for_class(conn, &class_id).map_err(|e| HandlerErr::db("db_query_failed", e))?;

    // Switching class or date discards whatever was being marked before.
    if let Some(prev) = state.attendance.as_ref().filter(|p| p.record_count() > 0) {
        tracing::info!(
            class_id = %prev.class_id(),
            discarded = prev.record_count(),
            "unsubmitted attendance discarded"
        );
    }
    let session = teacher.open_attendance(&class_id, date, roster);
    let result = sheet_json(&session, slot, "");
    state.attendance = Some(session);
    state.slot = slot;
    Ok(result)
}

fn attendance_select_session(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let raw = get_required_str(params, "session")?;
    let slot = SessionSlot::parse(&raw)
        .ok_or_else(|| HandlerErr::bad_params("session must be morning, afternoon or evening"))?;
    let session = state.attendance.as_ref().ok_or_else(no_session)?;
    let result = sheet_json(session, slot, "");
    state.slot = slot;
    Ok(result)
}

fn attendance_set_status(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let student_id = get_required_str(params, "studentId")?;
    let status = get_status(params)?;
    let slot = get_slot(params, state.slot)?;
    let session = state.attendance.as_mut().ok_or_else(no_session)?;

    session.set_status(&student_id, slot, status)?;
    Ok(json!({
        "studentId": student_id,
        "session": slot,
        "status": status,
        "complete": session.is_complete(slot),
    }))
}

fn attendance_mark_all(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let status = get_status(params)?;
    let slot = get_slot(params, state.slot)?;
    let session = state.attendance.as_mut().ok_or_else(no_session)?;

    session.mark_all_as(status, slot);
    tracing::info!(class_id = %session.class_id(), session = %slot, %status, "marked all");
    Ok(sheet_json(session, slot, ""))
}

fn attendance_status_of(state: &AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let student_id = get_required_str(params, "studentId")?;
    let slot = get_slot(params, state.slot)?;
    let session = state.attendance.as_ref().ok_or_else(no_session)?;
    Ok(json!({
        "studentId": student_id,
        "session": slot,
        "status": session.status_of(&student_id, slot),
    }))
}

fn attendance_sheet(state: &AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let slot = get_slot(params, state.slot)?;
    let query = get_optional_str(params, "query").unwrap_or_default();
    let session = state.attendance.as_ref().ok_or_else(no_session)?;
    Ok(sheet_json(session, slot, &query))
}

fn attendance_import_csv(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let text = params
        .get("text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params("missing text"))?;
    let slot = get_slot(params, state.slot)?;
    let session = state.attendance.as_mut().ok_or_else(no_session)?;

    let mut notices = NoticeLog::default();
    let outcome = session
        .import_csv(text, slot, &mut notices)
        .map_err(|e| failed(e, &notices))?;
    Ok(json!({
        "session": slot,
        "imported": outcome.imported,
        "rejected": outcome.rejected,
        "rejections": outcome.rejections,
        "complete": session.is_complete(slot),
        "notices": notices.to_json(),
    }))
}

fn attendance_submit(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let AppState {
        db,
        viewer,
        attendance,
        slot,
        ..
    } = state;
    let teacher = require_teacher(viewer)?;
    let slot = get_slot(params, *slot)?;
    let conn = require_db(db)?;
    let session = attendance.as_ref().ok_or_else(no_session)?;

    let mut sink = SqliteSubmissionSink {
        conn,
        submitted_by: Some(teacher.user_id().to_string()),
    };
    let mut notices = NoticeLog::default();
    let receipt = session
        .submit(slot, &mut sink, &mut notices)
        .map_err(|e| failed(e, &notices))?;
    Ok(json!({
        "session": slot,
        "submissionId": receipt.submission_id,
        "recordCount": receipt.record_count,
        "notices": notices.to_json(),
    }))
}

fn attendance_history(state: &AppState, params: &Value) -> Result<Value, HandlerErr> {
    let viewer = require_viewer(&state.viewer)?;
    let student_id = match (get_optional_str(params, "studentId"), viewer) {
        (Some(id), _) => id,
        (None, Viewer::Student(s)) => s.student_id().to_string(),
        (None, Viewer::Teacher(_)) => return Err(HandlerErr::bad_params("missing studentId")),
    };
    if !viewer.can_view_history(&student_id) {
        return Err(HandlerErr::new(
            "forbidden",
            "students may only view their own attendance",
        ));
    }
    let conn = require_db(&state.db)?;

    let entries =
        db::student_history(conn, &student_id).map_err(|e| HandlerErr::db("db_query_failed", e))?;
    let summary = history::summarize(&entries);
    Ok(json!({
        "studentId": student_id,
        "summary": summary,
        "entries": entries,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.open" => attendance_open(state, &req.params),
        "attendance.selectSession" => attendance_select_session(state, &req.params),
        "attendance.setStatus" => attendance_set_status(state, &req.params),
        "attendance.markAll" => attendance_mark_all(state, &req.params),
        "attendance.statusOf" => attendance_status_of(state, &req.params),
        "attendance.sheet" => attendance_sheet(state, &req.params),
        "attendance.importCsv" => attendance_import_csv(state, &req.params),
        "attendance.submit" => attendance_submit(state, &req.params),
        "attendance.history" => attendance_history(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}

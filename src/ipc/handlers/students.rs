use crate::attendance::filter_students;
use crate::db;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_str, require_db, require_teacher};
use crate::ipc::types::{AppState, Request};
use rusqlite::Connection;
use serde_json::json;

type HandlerResult = Result<serde_json::Value, HandlerErr>;

fn ensure_class(conn: &Connection, class_id: &str) -> Result<(), HandlerErr> {
    match db::class_exists(conn, class_id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(HandlerErr::new("not_found", "class not found")),
        Err(e) => Err(HandlerErr::db("db_query_failed", e)),
    }
}

/// Rebuilds the roster of open attendance for `class_id` so its marks never
/// outlive the students they belong to.
fn refresh_open_roster(state: &mut AppState, class_id: &str) -> Result<(), HandlerErr> {
    let Some(session) = state
        .attendance
        .as_mut()
        .filter(|s| s.class_id() == class_id)
    else {
        return Ok(());
    };
    let conn = require_db(&state.db)?;
    let roster =
        db::roster_for_class(conn, class_id).map_err(|e| HandlerErr::db("db_query_failed", e))?;
    let dropped = session.refresh_roster(roster);
    tracing::debug!(class_id = %class_id, dropped, "open attendance roster refreshed");
    Ok(())
}

fn students_list(state: &AppState, params: &serde_json::Value) -> HandlerResult {
    require_teacher(&state.viewer)?;
    let conn = require_db(&state.db)?;
    let class_id = get_required_str(params, "classId")?;
    ensure_class(conn, &class_id)?;

    let roster =
        db::roster_for_class(conn, &class_id).map_err(|e| HandlerErr::db("db_query_failed", e))?;
    let query = get_optional_str(params, "query").unwrap_or_default();
    let students = filter_students(&roster, &query);
    Ok(json!({ "students": students }))
}

fn students_create(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    require_teacher(&state.viewer)?;
    let conn = require_db(&state.db)?;
    let class_id = get_required_str(params, "classId")?;
    let name = get_required_str(params, "name")?;
    let roll_no = get_required_str(params, "rollNo")?;
    ensure_class(conn, &class_id)?;

    let taken = db::roll_no_taken(conn, &class_id, &roll_no)
        .map_err(|e| HandlerErr::db("db_query_failed", e))?;
    if taken {
        return Err(HandlerErr::new("duplicate_roll_no", "Roll number already exists")
            .with_details(json!({ "rollNo": roll_no })));
    }

    let student_id = db::insert_student(conn, &class_id, &name, &roll_no)
        .map_err(|e| HandlerErr::db("db_insert_failed", e))?;
    tracing::info!(
        class_id = %class_id,
        student_id = %student_id,
        roll_no = %roll_no,
        "student added"
    );
    refresh_open_roster(state, &class_id)?;
    Ok(json!({ "studentId": student_id, "name": name, "rollNo": roll_no }))
}

fn students_delete(state: &mut AppState, params: &serde_json::Value) -> HandlerResult {
    require_teacher(&state.viewer)?;
    let conn = require_db(&state.db)?;
    let class_id = get_required_str(params, "classId")?;
    let student_id = get_required_str(params, "studentId")?;

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| HandlerErr::new("db_tx_failed", e.to_string()))?;
    tx.execute(
        "DELETE FROM attendance_records WHERE student_id = ?",
        [&student_id],
    )
    .map_err(|e| HandlerErr::new("db_delete_failed", e.to_string()))?;
    let removed = tx
        .execute(
            "DELETE FROM students WHERE class_id = ? AND id = ?",
            (&class_id, &student_id),
        )
        .map_err(|e| HandlerErr::new("db_delete_failed", e.to_string()))?;
    if removed == 0 {
        return Err(HandlerErr::new("not_found", "student not found"));
    }
    tx.commit()
        .map_err(|e| HandlerErr::new("db_commit_failed", e.to_string()))?;

    tracing::info!(class_id = %class_id, student_id = %student_id, "student deleted");
    refresh_open_roster(state, &class_id)?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(respond(&req.id, students_list(state, &req.params))),
        "students.create" => Some(respond(&req.id, students_create(state, &req.params))),
        "students.delete" => Some(respond(&req.id, students_delete(state, &req.params))),
        _ => None,
    }
}

use crate::attendance::{AttendanceStatus, SessionSlot};
use crate::ipc::error::HandlerErr;
use crate::viewer::{TeacherView, Viewer};
use rusqlite::Connection;
use serde_json::Value;

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_optional_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `params.session` when present, otherwise `fallback`.
pub fn get_slot(params: &Value, fallback: SessionSlot) -> Result<SessionSlot, HandlerErr> {
    match get_optional_str(params, "session") {
        None => Ok(fallback),
        Some(s) => SessionSlot::parse(&s).ok_or_else(|| {
            HandlerErr::bad_params("session must be morning, afternoon or evening")
                .with_details(serde_json::json!({ "session": s, "allowed": SessionSlot::ALL }))
        }),
    }
}

pub fn get_status(params: &Value) -> Result<AttendanceStatus, HandlerErr> {
    let raw = get_required_str(params, "status")?;
    AttendanceStatus::parse(&raw).ok_or_else(|| {
        HandlerErr::bad_params("status must be present, absent or leave")
            .with_details(serde_json::json!({ "status": raw }))
    })
}

pub fn require_db(db: &Option<Connection>) -> Result<&Connection, HandlerErr> {
    db.as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

pub fn require_viewer(viewer: &Option<Viewer>) -> Result<&Viewer, HandlerErr> {
    viewer
        .as_ref()
        .ok_or_else(|| HandlerErr::new("not_signed_in", "sign in first"))
}

pub fn require_teacher(viewer: &Option<Viewer>) -> Result<&TeacherView, HandlerErr> {
    require_viewer(viewer)?
        .as_teacher()
        .ok_or_else(|| HandlerErr::new("forbidden", "only teachers may do this"))
}

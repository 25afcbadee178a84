use std::path::PathBuf;

use crate::attendance::{AttendanceSession, SessionSlot};
use crate::viewer::Viewer;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub viewer: Option<Viewer>,
    /// Attendance being taken for the currently selected class and date.
    pub attendance: Option<AttendanceSession>,
    /// Slot used when a request does not name one.
    pub slot: SessionSlot,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            db: None,
            viewer: None,
            attendance: None,
            slot: SessionSlot::Morning,
        }
    }
}

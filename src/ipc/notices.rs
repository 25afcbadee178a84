use crate::attendance::{NoticeKind, NotificationSink};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Collects user-facing notices so they can ride along in the response.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.notices).unwrap_or_else(|_| Value::Array(Vec::new()))
    }
}

impl NotificationSink for NoticeLog {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => tracing::info!(notice = message),
            NoticeKind::Error => tracing::warn!(notice = message),
        }
        self.notices.push(Notice {
            kind,
            message: message.to_string(),
        });
    }
}

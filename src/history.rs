use crate::attendance::{AttendanceStatus, SessionSlot};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub class_id: String,
    pub date: NaiveDate,
    pub session: SessionSlot,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub present_sessions: usize,
    pub attendance_rate: u32,
    pub days_present: usize,
    pub days_absent: usize,
}

/// A day counts as present when any of its sessions was present.
pub fn summarize(entries: &[HistoryEntry]) -> HistorySummary {
    let mut by_day: BTreeMap<NaiveDate, bool> = BTreeMap::new();
    let mut present_sessions = 0usize;
    for e in entries {
        let present = e.status == AttendanceStatus::Present;
        if present {
            present_sessions += 1;
        }
        *by_day.entry(e.date).or_insert(false) |= present;
    }
    let days_present = by_day.values().filter(|p| **p).count();

    let total_sessions = entries.len();
    let attendance_rate = if total_sessions == 0 {
        0
    } else {
        (present_sessions as f64 * 100.0 / total_sessions as f64).round() as u32
    };

    HistorySummary {
        total_sessions,
        present_sessions,
        attendance_rate,
        days_present,
        days_absent: by_day.len() - days_present,
    }
}

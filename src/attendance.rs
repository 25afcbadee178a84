use crate::csv_import::{self, ImportRow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSlot {
    Morning,
    Afternoon,
    Evening,
}

impl SessionSlot {
    pub const ALL: [SessionSlot; 3] = [
        SessionSlot::Morning,
        SessionSlot::Afternoon,
        SessionSlot::Evening,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionSlot::Morning => "morning",
            SessionSlot::Afternoon => "afternoon",
            SessionSlot::Evening => "evening",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SessionSlot::Morning => "Morning",
            SessionSlot::Afternoon => "Afternoon",
            SessionSlot::Evening => "Evening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Some(SessionSlot::Morning),
            "afternoon" => Some(SessionSlot::Afternoon),
            "evening" => Some(SessionSlot::Evening),
            _ => None,
        }
    }
}

impl fmt::Display for SessionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        }
    }

    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "leave" => Some(AttendanceStatus::Leave),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: String,
    pub session: SessionSlot,
    pub status: AttendanceStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttendanceError {
    #[error("please mark attendance for all students in the {session} session")]
    Validation { session: SessionSlot },
    #[error("{0}")]
    ImportFormat(String),
    #[error("student {0} is not on this roster")]
    UnknownStudent(String),
    #[error("{0}")]
    Submission(String),
}

impl AttendanceError {
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceError::Validation { .. } => "validation_error",
            AttendanceError::ImportFormat(_) => "import_format_error",
            AttendanceError::UnknownStudent(_) => "unknown_student",
            AttendanceError::Submission(_) => "submission_failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

pub trait NotificationSink {
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub class_id: String,
    pub date: NaiveDate,
    pub session: SessionSlot,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub record_count: usize,
}

pub trait SubmissionSink {
    fn submit(&mut self, payload: &SubmissionPayload) -> anyhow::Result<SubmissionReceipt>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    ShortRow,
    UnknownRollNo,
    InvalidStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRejection {
    pub line: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported: usize,
    pub rejected: usize,
    pub rejections: Vec<RowRejection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub unmarked: usize,
}

/// Attendance being taken for one class on one date.
///
/// Records are keyed by `(student_id, session)`; a later write for the same
/// key replaces the earlier one. Every key in the set belongs to a roster
/// student; `refresh_roster` keeps that true when the class changes.
#[derive(Debug, Clone)]
pub struct AttendanceSession {
    class_id: String,
    date: NaiveDate,
    roster: Vec<Student>,
    records: HashMap<(String, SessionSlot), AttendanceStatus>,
}

impl AttendanceSession {
    pub fn new(class_id: impl Into<String>, date: NaiveDate, roster: Vec<Student>) -> Self {
        Self {
            class_id: class_id.into(),
            date,
            roster,
            records: HashMap::new(),
        }
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Swaps in the current class roster, dropping marks for students that
    /// left it. Returns how many marks were dropped.
    pub fn refresh_roster(&mut self, roster: Vec<Student>) -> usize {
        let before = self.records.len();
        self.roster = roster;
        let roster = &self.roster;
        self.records
            .retain(|(id, _), _| roster.iter().any(|s| &s.id == id));
        before - self.records.len()
    }

    fn on_roster(&self, student_id: &str) -> bool {
        self.roster.iter().any(|s| s.id == student_id)
    }

    pub fn set_status(
        &mut self,
        student_id: &str,
        session: SessionSlot,
        status: AttendanceStatus,
    ) -> Result<(), AttendanceError> {
        if !self.on_roster(student_id) {
            return Err(AttendanceError::UnknownStudent(student_id.to_string()));
        }
        self.records.insert((student_id.to_string(), session), status);
        Ok(())
    }

    /// Overwrites `session` for the whole roster. Prior marks in that session
    /// are discarded, other sessions are untouched.
    pub fn mark_all_as(&mut self, status: AttendanceStatus, session: SessionSlot) {
        self.records.retain(|(_, s), _| *s != session);
        for student in &self.roster {
            self.records.insert((student.id.clone(), session), status);
        }
    }

    pub fn status_of(&self, student_id: &str, session: SessionSlot) -> Option<AttendanceStatus> {
        self.records.get(&(student_id.to_string(), session)).copied()
    }

    pub fn is_complete(&self, session: SessionSlot) -> bool {
        self.roster
            .iter()
            .all(|s| self.status_of(&s.id, session).is_some())
    }

    /// Records for `session` in roster order.
    pub fn records_for(&self, session: SessionSlot) -> Vec<AttendanceRecord> {
        self.roster
            .iter()
            .filter_map(|s| {
                self.status_of(&s.id, session).map(|status| AttendanceRecord {
                    student_id: s.id.clone(),
                    session,
                    status,
                })
            })
            .collect()
    }

    pub fn missing(&self, session: SessionSlot) -> Vec<&Student> {
        self.roster
            .iter()
            .filter(|s| self.status_of(&s.id, session).is_none())
            .collect()
    }

    pub fn tally(&self, session: SessionSlot) -> Tally {
        let mut tally = Tally::default();
        for student in &self.roster {
            match self.status_of(&student.id, session) {
                Some(AttendanceStatus::Present) => tally.present += 1,
                Some(AttendanceStatus::Absent) => tally.absent += 1,
                Some(AttendanceStatus::Leave) => tally.leave += 1,
                None => tally.unmarked += 1,
            }
        }
        tally
    }

    /// Roster students whose name or roll number contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Student> {
        filter_students(&self.roster, query)
    }

    /// Merges parsed rows into `session`. Rows naming an unknown roll number
    /// or an invalid status are skipped and counted as rejected.
    pub fn import_batch(&mut self, rows: &[ImportRow], session: SessionSlot) -> ImportOutcome {
        let by_roll: HashMap<&str, String> = self
            .roster
            .iter()
            .map(|s| (s.roll_no.as_str(), s.id.clone()))
            .collect();

        let mut accepted: Vec<(String, AttendanceStatus)> = Vec::new();
        let mut outcome = ImportOutcome::default();
        for row in rows {
            let rejection = match row {
                ImportRow::Short { line } => Some(RowRejection {
                    line: *line,
                    reason: RejectReason::ShortRow,
                }),
                ImportRow::Fields {
                    line,
                    roll_no,
                    status,
                } => match (by_roll.get(roll_no.as_str()), AttendanceStatus::parse(status)) {
                    (None, _) => Some(RowRejection {
                        line: *line,
                        reason: RejectReason::UnknownRollNo,
                    }),
                    (Some(_), None) => Some(RowRejection {
                        line: *line,
                        reason: RejectReason::InvalidStatus,
                    }),
                    (Some(student_id), Some(status)) => {
                        accepted.push((student_id.clone(), status));
                        None
                    }
                },
            };
            if let Some(r) = rejection {
                outcome.rejected += 1;
                outcome.rejections.push(r);
            }
        }

        outcome.imported = accepted.len();
        for (student_id, status) in accepted {
            self.records.insert((student_id, session), status);
        }
        outcome
    }

    /// Parses `text` and merges it into `session`, reporting the result to
    /// `notifier`. A malformed header aborts before any row is applied.
    pub fn import_csv(
        &mut self,
        text: &str,
        session: SessionSlot,
        notifier: &mut dyn NotificationSink,
    ) -> Result<ImportOutcome, AttendanceError> {
        let rows = match csv_import::parse_attendance_csv(text) {
            Ok(rows) => rows,
            Err(e) => {
                notifier.notify(NoticeKind::Error, &format!("Error processing CSV: {}", e));
                return Err(e);
            }
        };
        let outcome = self.import_batch(&rows, session);
        if outcome.imported > 0 {
            notifier.notify(
                NoticeKind::Success,
                &format!(
                    "Successfully imported attendance for {} students",
                    outcome.imported
                ),
            );
        } else {
            notifier.notify(NoticeKind::Error, "No valid records found in the CSV file");
        }
        tracing::info!(
            class_id = %self.class_id,
            %session,
            imported = outcome.imported,
            rejected = outcome.rejected,
            "attendance csv imported"
        );
        Ok(outcome)
    }

    /// Hands the records of `session` to `sink` once every roster student has
    /// been marked. Nothing reaches the sink while the session is incomplete.
    pub fn submit(
        &self,
        session: SessionSlot,
        sink: &mut dyn SubmissionSink,
        notifier: &mut dyn NotificationSink,
    ) -> Result<SubmissionReceipt, AttendanceError> {
        if !self.is_complete(session) {
            let e = AttendanceError::Validation { session };
            tracing::warn!(
                class_id = %self.class_id,
                %session,
                missing = self.missing(session).len(),
                "submission rejected"
            );
            notifier.notify(NoticeKind::Error, &e.to_string());
            return Err(e);
        }

        let payload = SubmissionPayload {
            class_id: self.class_id.clone(),
            date: self.date,
            session,
            records: self.records_for(session),
        };
        match sink.submit(&payload) {
            Ok(receipt) => {
                notifier.notify(
                    NoticeKind::Success,
                    &format!(
                        "{} session attendance submitted successfully",
                        session.title()
                    ),
                );
                Ok(receipt)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(
                    class_id = %self.class_id,
                    %session,
                    error = %message,
                    "submission failed"
                );
                notifier.notify(NoticeKind::Error, &message);
                Err(AttendanceError::Submission(message))
            }
        }
    }
}

pub fn filter_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let q = query.trim().to_lowercase();
    students
        .iter()
        .filter(|s| {
            q.is_empty()
                || s.name.to_lowercase().contains(&q)
                || s.roll_no.to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Student> {
        [
            ("1", "Alice Smith", "S001"),
            ("2", "Bob Johnson", "S002"),
            ("3", "Charlie Brown", "S003"),
        ]
        .into_iter()
        .map(|(id, name, roll)| Student {
            id: id.to_string(),
            name: name.to_string(),
            roll_no: roll.to_string(),
        })
        .collect()
    }

    fn session() -> AttendanceSession {
        let date = NaiveDate::from_ymd_opt(2025, 4, 14).expect("date");
        AttendanceSession::new("class-a", date, roster())
    }

    #[derive(Default)]
    struct Notices(Vec<(NoticeKind, String)>);

    impl NotificationSink for Notices {
        fn notify(&mut self, kind: NoticeKind, message: &str) {
            self.0.push((kind, message.to_string()));
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<SubmissionPayload>,
        fail: bool,
    }

    impl SubmissionSink for RecordingSink {
        fn submit(&mut self, payload: &SubmissionPayload) -> anyhow::Result<SubmissionReceipt> {
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            self.calls.push(payload.clone());
            Ok(SubmissionReceipt {
                submission_id: "sub-1".to_string(),
                record_count: payload.records.len(),
            })
        }
    }

    #[test]
    fn set_status_then_lookup() {
        let mut s = session();
        for student in roster() {
            for slot in SessionSlot::ALL {
                s.set_status(&student.id, slot, AttendanceStatus::Leave)
                    .expect("set");
                assert_eq!(s.status_of(&student.id, slot), Some(AttendanceStatus::Leave));
            }
        }
        assert_eq!(s.status_of("missing", SessionSlot::Morning), None);
    }

    #[test]
    fn set_status_is_idempotent() {
        let mut once = session();
        once.set_status("1", SessionSlot::Morning, AttendanceStatus::Present)
            .expect("set");
        let mut twice = session();
        twice
            .set_status("1", SessionSlot::Morning, AttendanceStatus::Present)
            .expect("set");
        twice
            .set_status("1", SessionSlot::Morning, AttendanceStatus::Present)
            .expect("set");
        assert_eq!(once.records, twice.records);
        assert_eq!(twice.record_count(), 1);
    }

    #[test]
    fn set_status_rejects_students_off_roster() {
        let mut s = session();
        let e = s
            .set_status("99", SessionSlot::Morning, AttendanceStatus::Present)
            .expect_err("unknown student");
        assert_eq!(e, AttendanceError::UnknownStudent("99".to_string()));
        assert_eq!(s.record_count(), 0);
    }

    #[test]
    fn mark_all_overwrites_only_the_target_session() {
        let mut s = session();
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Leave)
            .expect("set");
        s.set_status("2", SessionSlot::Afternoon, AttendanceStatus::Absent)
            .expect("set");

        s.mark_all_as(AttendanceStatus::Present, SessionSlot::Morning);

        let morning = s.records_for(SessionSlot::Morning);
        assert_eq!(morning.len(), 3);
        assert!(morning.iter().all(|r| r.status == AttendanceStatus::Present));
        assert_eq!(
            s.status_of("2", SessionSlot::Afternoon),
            Some(AttendanceStatus::Absent)
        );
        assert_eq!(s.records_for(SessionSlot::Afternoon).len(), 1);
    }

    #[test]
    fn completeness_tracks_every_roster_student() {
        let mut s = session();
        assert!(!s.is_complete(SessionSlot::Evening));
        s.set_status("1", SessionSlot::Evening, AttendanceStatus::Present)
            .expect("set");
        s.set_status("2", SessionSlot::Evening, AttendanceStatus::Absent)
            .expect("set");
        assert!(!s.is_complete(SessionSlot::Evening));
        assert_eq!(s.missing(SessionSlot::Evening).len(), 1);
        s.set_status("3", SessionSlot::Evening, AttendanceStatus::Leave)
            .expect("set");
        assert!(s.is_complete(SessionSlot::Evening));
        assert!(!s.is_complete(SessionSlot::Morning));
    }

    #[test]
    fn incomplete_submit_never_reaches_the_sink() {
        let mut s = session();
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Present)
            .expect("set");
        let mut sink = RecordingSink::default();
        let mut notices = Notices::default();

        let e = s
            .submit(SessionSlot::Morning, &mut sink, &mut notices)
            .expect_err("incomplete");
        assert_eq!(
            e,
            AttendanceError::Validation {
                session: SessionSlot::Morning
            }
        );
        assert!(e.to_string().contains("morning"));
        assert!(sink.calls.is_empty());
        assert_eq!(notices.0[0].0, NoticeKind::Error);
    }

    #[test]
    fn complete_submit_hands_only_that_session_to_the_sink() {
        let mut s = session();
        s.mark_all_as(AttendanceStatus::Present, SessionSlot::Afternoon);
        s.set_status("2", SessionSlot::Afternoon, AttendanceStatus::Absent)
            .expect("set");
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Leave)
            .expect("set");
        let mut sink = RecordingSink::default();
        let mut notices = Notices::default();

        let receipt = s
            .submit(SessionSlot::Afternoon, &mut sink, &mut notices)
            .expect("submit");
        assert_eq!(receipt.record_count, 3);
        assert_eq!(sink.calls.len(), 1);
        let payload = &sink.calls[0];
        assert_eq!(payload.class_id, "class-a");
        assert!(payload
            .records
            .iter()
            .all(|r| r.session == SessionSlot::Afternoon));
        assert_eq!(
            notices.0,
            vec![(
                NoticeKind::Success,
                "Afternoon session attendance submitted successfully".to_string()
            )]
        );
    }

    #[test]
    fn sink_failure_is_reported() {
        let mut s = session();
        s.mark_all_as(AttendanceStatus::Absent, SessionSlot::Morning);
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut notices = Notices::default();
        let e = s
            .submit(SessionSlot::Morning, &mut sink, &mut notices)
            .expect_err("sink failure");
        assert_eq!(e, AttendanceError::Submission("network unreachable".to_string()));
        assert_eq!(notices.0[0], (NoticeKind::Error, "network unreachable".to_string()));
    }

    #[test]
    fn import_counts_and_normalizes_statuses() {
        let mut s = session();
        let mut notices = Notices::default();
        let text = "rollNo,status\nS001,present\nS002,Absent\nS999,present\nS003,maybe\n";
        let outcome = s
            .import_csv(text, SessionSlot::Morning, &mut notices)
            .expect("import");
        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.rejected, 2);
        assert_eq!(
            outcome
                .rejections
                .iter()
                .map(|r| r.reason)
                .collect::<Vec<_>>(),
            vec![RejectReason::UnknownRollNo, RejectReason::InvalidStatus]
        );
        assert_eq!(s.status_of("1", SessionSlot::Morning), Some(AttendanceStatus::Present));
        assert_eq!(s.status_of("2", SessionSlot::Morning), Some(AttendanceStatus::Absent));
        assert_eq!(s.status_of("3", SessionSlot::Morning), None);
        assert_eq!(s.record_count(), 2);
        assert_eq!(notices.0[0].0, NoticeKind::Success);
    }

    #[test]
    fn short_rows_are_rejected_without_failing_the_batch() {
        let mut s = session();
        let mut notices = Notices::default();
        let text = "name,rollNo,status\nAlice,S001\nBob,S002,present\n";
        let outcome = s
            .import_csv(text, SessionSlot::Afternoon, &mut notices)
            .expect("import");
        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.rejected, 1);
        assert_eq!(
            outcome.rejections,
            vec![RowRejection {
                line: 2,
                reason: RejectReason::ShortRow
            }]
        );
        assert_eq!(s.status_of("1", SessionSlot::Afternoon), None);
        assert_eq!(s.status_of("2", SessionSlot::Afternoon), Some(AttendanceStatus::Present));
        assert_eq!(notices.0[0].0, NoticeKind::Success);
    }

    #[test]
    fn refreshed_roster_drops_marks_of_removed_students() {
        let mut s = session();
        s.mark_all_as(AttendanceStatus::Present, SessionSlot::Morning);
        s.set_status("1", SessionSlot::Evening, AttendanceStatus::Leave)
            .expect("set");

        let remaining: Vec<Student> = roster().into_iter().filter(|st| st.id != "1").collect();
        assert_eq!(s.refresh_roster(remaining), 2);
        assert_eq!(s.status_of("1", SessionSlot::Morning), None);
        assert_eq!(s.status_of("1", SessionSlot::Evening), None);
        assert!(s.is_complete(SessionSlot::Morning));
        assert_eq!(s.records_for(SessionSlot::Morning).len(), 2);

        let mut grown = roster();
        grown.push(Student {
            id: "4".to_string(),
            name: "Dana White".to_string(),
            roll_no: "S004".to_string(),
        });
        assert_eq!(s.refresh_roster(grown), 0);
        assert!(!s.is_complete(SessionSlot::Morning));
        assert_eq!(s.missing(SessionSlot::Morning).len(), 2);
    }

    #[test]
    fn import_merges_with_existing_marks() {
        let mut s = session();
        s.set_status("3", SessionSlot::Morning, AttendanceStatus::Leave)
            .expect("set");
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Absent)
            .expect("set");
        let mut notices = Notices::default();
        s.import_csv("rollNo,status\nS001,present", SessionSlot::Morning, &mut notices)
            .expect("import");
        assert_eq!(s.status_of("1", SessionSlot::Morning), Some(AttendanceStatus::Present));
        assert_eq!(s.status_of("3", SessionSlot::Morning), Some(AttendanceStatus::Leave));
    }

    #[test]
    fn import_with_no_valid_rows_is_reported_as_error() {
        let mut s = session();
        let mut notices = Notices::default();
        let text = "rollNo,status\nS404,present\nS001,late";
        let outcome = s
            .import_csv(text, SessionSlot::Evening, &mut notices)
            .expect("parsed");
        assert_eq!(outcome.imported, 0);
        assert_eq!(outcome.rejected, 2);
        assert_eq!(
            notices.0,
            vec![(NoticeKind::Error, "No valid records found in the CSV file".to_string())]
        );
    }

    #[test]
    fn import_format_error_leaves_the_set_untouched() {
        let mut s = session();
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Leave)
            .expect("set");
        let mut notices = Notices::default();
        let e = s
            .import_csv("roll,state\nS002,present", SessionSlot::Morning, &mut notices)
            .expect_err("format");
        assert_eq!(e.code(), "import_format_error");
        assert_eq!(s.record_count(), 1);
        assert!(notices.0[0].1.starts_with("Error processing CSV"));
    }

    #[test]
    fn tally_and_search() {
        let mut s = session();
        s.set_status("1", SessionSlot::Morning, AttendanceStatus::Present)
            .expect("set");
        s.set_status("2", SessionSlot::Morning, AttendanceStatus::Leave)
            .expect("set");
        assert_eq!(
            s.tally(SessionSlot::Morning),
            Tally {
                present: 1,
                absent: 0,
                leave: 1,
                unmarked: 1
            }
        );
        let hits = s.search("bro");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].roll_no, "S003");
        assert_eq!(s.search("s00").len(), 3);
        assert_eq!(s.search("  ").len(), 3);
    }

    #[test]
    fn slot_and_status_parsing() {
        assert_eq!(SessionSlot::parse(" Evening "), Some(SessionSlot::Evening));
        assert_eq!(SessionSlot::parse("night"), None);
        assert_eq!(AttendanceStatus::parse("LEAVE"), Some(AttendanceStatus::Leave));
        assert_eq!(AttendanceStatus::parse("late"), None);
    }
}

use crate::attendance::{
    AttendanceStatus, SessionSlot, Student, SubmissionPayload, SubmissionReceipt, SubmissionSink,
};
use crate::history::HistoryEntry;
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("attendd.sqlite3");
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS classes(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            class_id TEXT NOT NULL,
            name TEXT NOT NULL,
            roll_no TEXT NOT NULL,
            sort_order INTEGER NOT NULL,
            FOREIGN KEY(class_id) REFERENCES classes(id),
            UNIQUE(class_id, roll_no)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_class_sort ON students(class_id, sort_order)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance_submissions(
            id TEXT PRIMARY KEY,
            class_id TEXT NOT NULL,
            date TEXT NOT NULL,
            session TEXT NOT NULL,
            submitted_by TEXT,
            submitted_at TEXT NOT NULL,
            FOREIGN KEY(class_id) REFERENCES classes(id),
            UNIQUE(class_id, date, session)
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance_records(
            submission_id TEXT NOT NULL,
            student_id TEXT NOT NULL,
            status TEXT NOT NULL,
            PRIMARY KEY(submission_id, student_id),
            FOREIGN KEY(submission_id) REFERENCES attendance_submissions(id) ON DELETE CASCADE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendance_records_student ON attendance_records(student_id)",
        [],
    )?;

    Ok(conn)
}

pub fn class_exists(conn: &Connection, class_id: &str) -> anyhow::Result<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM classes WHERE id = ?", [class_id], |r| {
            r.get::<_, i64>(0)
        })
        .optional()?
        .is_some())
}

/// Students of a class in roster order.
pub fn roster_for_class(conn: &Connection, class_id: &str) -> anyhow::Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, roll_no
         FROM students
         WHERE class_id = ?
         ORDER BY sort_order",
    )?;
    let students = stmt
        .query_map([class_id], |r| {
            Ok(Student {
                id: r.get(0)?,
                name: r.get(1)?,
                roll_no: r.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(students)
}

pub fn roll_no_taken(conn: &Connection, class_id: &str, roll_no: &str) -> anyhow::Result<bool> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM students WHERE class_id = ? AND roll_no = ?",
            (class_id, roll_no),
            |r| r.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

pub fn insert_student(
    conn: &Connection,
    class_id: &str,
    name: &str,
    roll_no: &str,
) -> anyhow::Result<String> {
    let next_sort: i64 = conn.query_row(
        "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM students WHERE class_id = ?",
        [class_id],
        |r| r.get(0),
    )?;
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO students(id, class_id, name, roll_no, sort_order) VALUES(?, ?, ?, ?, ?)",
        (&id, class_id, name, roll_no, next_sort),
    )?;
    Ok(id)
}

/// Persisted attendance of one student across all submissions, oldest first.
pub fn student_history(conn: &Connection, student_id: &str) -> anyhow::Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT s.class_id, s.date, s.session, r.status
         FROM attendance_records r
         JOIN attendance_submissions s ON s.id = r.submission_id
         WHERE r.student_id = ?
         ORDER BY s.date, CASE s.session
           WHEN 'morning' THEN 0 WHEN 'afternoon' THEN 1 ELSE 2 END",
    )?;
    let raw = stmt
        .query_map([student_id], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(class_id, date, session, status)| -> anyhow::Result<HistoryEntry> {
            Ok(HistoryEntry {
                class_id,
                date: date
                    .parse()
                    .with_context(|| format!("bad stored date {date:?}"))?,
                session: SessionSlot::parse(&session)
                    .with_context(|| format!("bad stored session {session:?}"))?,
                status: AttendanceStatus::parse(&status)
                    .with_context(|| format!("bad stored status {status:?}"))?,
            })
        })
        .collect()
}

/// Writes submitted attendance into the workspace. A resubmission for the
/// same class, date and session replaces the earlier one.
pub struct SqliteSubmissionSink<'a> {
    pub conn: &'a Connection,
    pub submitted_by: Option<String>,
}

impl SubmissionSink for SqliteSubmissionSink<'_> {
    fn submit(&mut self, payload: &SubmissionPayload) -> anyhow::Result<SubmissionReceipt> {
        let date = payload.date.format("%Y-%m-%d").to_string();
        let session = payload.session.as_str();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM attendance_records WHERE submission_id IN (
               SELECT id FROM attendance_submissions
               WHERE class_id = ? AND date = ? AND session = ?
             )",
            (&payload.class_id, &date, session),
        )?;
        tx.execute(
            "DELETE FROM attendance_submissions WHERE class_id = ? AND date = ? AND session = ?",
            (&payload.class_id, &date, session),
        )?;

        let submission_id = Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO attendance_submissions(id, class_id, date, session, submitted_by, submitted_at)
             VALUES(?, ?, ?, ?, ?, ?)",
            (
                &submission_id,
                &payload.class_id,
                &date,
                session,
                self.submitted_by.as_deref(),
                chrono::Utc::now().to_rfc3339(),
            ),
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO attendance_records(submission_id, student_id, status) VALUES(?, ?, ?)",
            )?;
            for r in &payload.records {
                stmt.execute((&submission_id, &r.student_id, r.status.as_str()))?;
            }
        }
        tx.commit()?;

        tracing::info!(
            submission_id = %submission_id,
            class_id = %payload.class_id,
            %date,
            session,
            records = payload.records.len(),
            "attendance submitted"
        );
        Ok(SubmissionReceipt {
            submission_id,
            record_count: payload.records.len(),
        })
    }
}

//! Attendance session records and submission payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format accepted in submissions and stored in history.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One student's mark within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceEntry {
    #[serde(alias = "aluno_id", deserialize_with = "student_id_from_any")]
    pub student_id: String,
    #[serde(alias = "presente")]
    pub present: bool,
}

impl AttendanceEntry {
    pub fn new(student_id: &str, present: bool) -> Self {
        Self {
            student_id: student_id.to_string(),
            present,
        }
    }
}

/// Accepts either a JSON string or a JSON number as a student id.
fn student_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accepts RFC 3339 or a naive ISO timestamp (read as UTC). Anything else
/// falls back to the epoch rather than rejecting the record.
fn recorded_at_lenient<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();

    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(at.with_timezone(&Utc));
    }
    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .unwrap_or_default())
}

/// Present/absent counts of a session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

impl AttendanceSummary {
    pub fn from_entries(entries: &[AttendanceEntry]) -> Self {
        let present = entries.iter().filter(|e| e.present).count();
        Self {
            present,
            absent: entries.len() - present,
            total: entries.len(),
        }
    }
}

/// One persisted attendance-taking session, keyed by (class_id, date).
///
/// Older history files use `turma_id`/`data`/`timestamp`/`presencas` and a
/// timestamp without an offset; both layouts are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    #[serde(alias = "turma_id")]
    pub class_id: i64,
    #[serde(alias = "data")]
    pub date: NaiveDate,
    #[serde(alias = "timestamp", default, deserialize_with = "recorded_at_lenient")]
    pub recorded_at: DateTime<Utc>,
    #[serde(alias = "presencas")]
    pub entries: Vec<AttendanceEntry>,
    #[serde(default)]
    pub summary: AttendanceSummary,
}

impl AttendanceRecord {
    pub fn new(class_id: i64, date: NaiveDate, entries: Vec<AttendanceEntry>) -> Self {
        let summary = AttendanceSummary::from_entries(&entries);
        Self {
            class_id,
            date,
            recorded_at: Utc::now(),
            entries,
            summary,
        }
    }

    pub fn is_same_session(&self, class_id: i64, date: NaiveDate) -> bool {
        self.class_id == class_id && self.date == date
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Request body for submitting a session.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAttendanceRequest {
    pub class_id: i64,
    pub date: String,
    pub presencas: Vec<AttendanceEntry>,
}

/// Fields that must be present in a submission body.
pub const SUBMIT_REQUIRED_FIELDS: &[&str] = &["class_id", "date", "presencas"];

/// Parse a submission date, accepting only `YYYY-MM-DD`.
pub fn parse_session_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

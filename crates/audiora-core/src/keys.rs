//! Data directory layout.
//!
//! Pure string functions. These define the canonical relative paths of
//! records kept by the local stand-in for the hosted store.

use uuid::Uuid;

use crate::models::report_format::ReportKind;

pub fn patient(id: Uuid) -> String {
    format!("patients/{id}.json")
}

pub fn session(id: Uuid) -> String {
    format!("sessions/{id}.json")
}

pub fn report_format(kind: ReportKind, id: Uuid) -> String {
    format!("report_formats/{}/{id}.json", kind.as_str())
}

pub fn report_docx(session_id: Uuid, kind: ReportKind) -> String {
    format!("reports/{session_id}/{}.docx", kind.as_str())
}

pub fn report_text(session_id: Uuid, kind: ReportKind) -> String {
    format!("reports/{session_id}/{}.md", kind.as_str())
}

pub const PATIENTS_PREFIX: &str = "patients/";

pub const SESSIONS_PREFIX: &str = "sessions/";

use audiora_core::models::report_format::ReportKind;

pub const PURETONE: &str = include_str!("../templates/puretone.md.tera");
pub const IMPEDANCE: &str = include_str!("../templates/impedance.md.tera");

/// Template name and body for a report kind.
pub fn template_for(kind: ReportKind) -> (&'static str, &'static str) {
    match kind {
        ReportKind::Puretone => ("puretone.md", PURETONE),
        ReportKind::Impedance => ("impedance.md", IMPEDANCE),
    }
}

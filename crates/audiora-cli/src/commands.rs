//! Command bodies behind the `audiora` binary.
//!
//! Everything here returns text or bytes; `main` decides where it goes.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use audiora_core::keys;
use audiora_core::models::ear::Ear;
use audiora_core::models::impedance::ImpedanceMeasurement;
use audiora_core::models::patient::Patient;
use audiora_core::models::report_format::{
    ImpedanceSections, PuretoneSections, ReportFormat, ReportKind, ReportLayout,
};
use audiora_core::models::session::{SessionKind, TestSession};
use audiora_core::numeric::Reading;
use audiora_diagnosis::curve::{NORMAL_REGION, tympanogram_curve};
use audiora_diagnosis::sync::{interpretation_for, restore_saved_diagnosis};
use audiora_diagnosis::{classify_tymp_type, synchronize};
use audiora_export::context::ReportContext;
use audiora_export::render::{export_docx, render_report};

use crate::config::AudioraConfig;

/// Read a session file and bring its derived fields up to date.
///
/// Files saved without override state get it rebuilt from the saved
/// diagnosis text before synchronizing.
pub fn load_session(path: &Path) -> eyre::Result<TestSession> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read session at {}: {e}", path.display()))?;
    parse_session(&contents)
}

pub fn parse_session(contents: &str) -> eyre::Result<TestSession> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let has_overrides = json.get("diagnosis_overrides").is_some();

    let mut session: TestSession = serde_json::from_value(json)?;
    if !has_overrides {
        restore_saved_diagnosis(&mut session);
    }
    synchronize(&mut session);
    tracing::debug!(session_id = %session.id, kind = %session.session_type, "session loaded");
    Ok(session)
}

pub fn load_patient(path: &Path) -> eyre::Result<Patient> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read patient at {}: {e}", path.display()))?;
    let patient: Patient = serde_json::from_str(&contents)?;
    patient.validate()?;
    Ok(patient)
}

/// Report kind exported when none is asked for.
pub fn default_kind(kind: SessionKind) -> ReportKind {
    if kind.includes_puretone() {
        ReportKind::Puretone
    } else {
        ReportKind::Impedance
    }
}

/// Plain-text summary of every derived field of a session.
pub fn diagnose_report(session: &TestSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session {} ({})", session.id, session.session_type);

    if session.session_type.includes_puretone() {
        let _ = writeln!(out, "\nPure tone");
        for ear in Ear::BOTH {
            let pta = session
                .pta
                .get(ear)
                .map(|v| format!("{v} dBHL"))
                .unwrap_or_else(|| "-".to_string());
            let overridden = if session.diagnosis_overrides.get(ear).is_overridden() {
                " (edited)"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {}  PTA {pta:<10} {}{overridden}",
                ear.short_label(),
                session.provisional_diagnosis.get(ear),
            );
        }
    }

    if session.session_type.includes_impedance() {
        let report = &session.report_data;
        let _ = writeln!(out, "\nImpedance");
        for ear in Ear::BOTH {
            let row = report.tymp.get(ear);
            let tymp_type = row.tymp_type.map(|t| t.label()).unwrap_or("-");
            let reflex: Vec<String> = report
                .reflex
                .get(ear)
                .entries()
                .iter()
                .map(|(freq, result)| format!("{freq}:{result}"))
                .collect();
            let _ = writeln!(
                out,
                "  {}  Type {tymp_type:<3} comp {} ml, ECV {} cc, MEP {} daPa",
                ear.short_label(),
                row.comp,
                row.ecv,
                row.mep,
            );
            let _ = writeln!(out, "      {}", report.interpretation.get(ear));
            let _ = writeln!(out, "      Reflex {}", reflex.join(" "));
            let _ = writeln!(out, "      Diagnosis: {}", report.diagnosis.get(ear));
        }
    }

    out
}

/// Classify one ear from raw command-line values.
pub fn tymp_report(pressure: &str, compliance: &str, volume: &str) -> String {
    let tymp_type = classify_tymp_type(
        &Reading::from(pressure),
        &Reading::from(compliance),
        &Reading::from(volume),
    );
    format!("Type {tymp_type}: {}", interpretation_for(Some(tymp_type)))
}

/// Sampled tympanogram as CSV, followed by the normal region as a comment.
pub fn curve_csv(measurement: &ImpedanceMeasurement) -> String {
    let mut out = String::from("pressure_dapa,compliance_ml\n");
    for point in tympanogram_curve(measurement) {
        let _ = writeln!(out, "{},{:.4}", point.pressure, point.compliance);
    }
    let _ = writeln!(
        out,
        "# normal region: pressure {}..{} daPa, compliance {}..{} ml",
        NORMAL_REGION.pressure_min,
        NORMAL_REGION.pressure_max,
        NORMAL_REGION.compliance_min,
        NORMAL_REGION.compliance_max,
    );
    out
}

/// Report output chosen by file extension: `.md` is the rendered text,
/// anything else is DOCX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutput {
    Text,
    Docx,
}

impl ReportOutput {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => ReportOutput::Text,
            _ => ReportOutput::Docx,
        }
    }
}

/// Render a report for a loaded session.
///
/// `format` names a saved layout of the same kind; without one the
/// session's own section toggles are used.
pub fn export_report(
    session: &TestSession,
    kind: ReportKind,
    config: &AudioraConfig,
    format: Option<&str>,
    patient: Option<&Patient>,
    output: ReportOutput,
) -> eyre::Result<Vec<u8>> {
    let mut session = session.clone();
    let layout = match format {
        Some(name) => {
            let saved = config.find_format(name, kind).ok_or_else(|| {
                eyre::eyre!("no saved {} report format named {name:?}", kind.as_str())
            })?;
            session.format_name = saved.name.clone();
            Some(&saved.layout)
        }
        None => None,
    };

    let context = ReportContext::build(
        &session,
        kind,
        patient,
        Some(&config.audiologist),
        layout,
    )?;

    let bytes = match output {
        ReportOutput::Text => render_report(&context)?.into_bytes(),
        ReportOutput::Docx => export_docx(&context, &config.styles)?,
    };
    Ok(bytes)
}

/// Default location of an exported report inside the data directory.
pub fn report_path(
    data_dir: &Path,
    session_id: uuid::Uuid,
    kind: ReportKind,
    output: ReportOutput,
) -> PathBuf {
    let relative = match output {
        ReportOutput::Text => keys::report_text(session_id, kind),
        ReportOutput::Docx => keys::report_docx(session_id, kind),
    };
    data_dir.join(relative)
}

/// Write the synchronized session into the data directory.
pub fn store_session(data_dir: &Path, session: &TestSession) -> eyre::Result<PathBuf> {
    let path = data_dir.join(keys::session(session.id));
    write_file(&path, session.to_json_pretty()?.as_bytes())?;
    tracing::info!(path = %path.display(), session_id = %session.id, "session stored");
    Ok(path)
}

pub fn write_file(path: &Path, bytes: &[u8]) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;
    Ok(())
}

/// Build a named layout of `kind` from the default sections with `off`
/// turned off.
pub fn format_with_sections_off(
    name: &str,
    kind: ReportKind,
    off: &[String],
) -> eyre::Result<ReportFormat> {
    let mut value = match kind {
        ReportKind::Puretone => serde_json::to_value(PuretoneSections::default())?,
        ReportKind::Impedance => serde_json::to_value(ImpedanceSections::default())?,
    };

    let obj = value
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("section layout is not a JSON object"))?;
    for key in off {
        let slot = obj.get_mut(key.as_str()).ok_or_else(|| {
            eyre::eyre!("unknown {} report section {key:?}", kind.as_str())
        })?;
        *slot = serde_json::Value::Bool(false);
    }

    let layout = match kind {
        ReportKind::Puretone => ReportLayout::Puretone(serde_json::from_value(value)?),
        ReportKind::Impedance => ReportLayout::Impedance(serde_json::from_value(value)?),
    };
    Ok(ReportFormat::new(name.trim(), layout))
}

/// Section keys and labels of a report kind, with their default state.
pub fn section_listing(kind: ReportKind) -> String {
    let entries = match kind {
        ReportKind::Puretone => PuretoneSections::default().entries(),
        ReportKind::Impedance => ImpedanceSections::default().entries(),
    };
    let mut out = String::new();
    for (key, label, on) in entries {
        let _ = writeln!(out, "{key:<28} {label:<36} {}", if on { "on" } else { "off" });
    }
    out
}

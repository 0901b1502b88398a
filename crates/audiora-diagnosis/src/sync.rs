//! Derived report fields.
//!
//! A [`TestSession`] holds raw measurements alongside report fields derived
//! from them: PTA, provisional diagnosis text, Weber marks, the
//! tympanogram results table, interpretation and acoustic reflexes.
//! [`apply`] folds one edit into the session and refreshes whatever that
//! edit feeds; [`synchronize`] refreshes everything, as after a load.
//!
//! Diagnosis text follows the classifier only while the ear's
//! [`OverrideState`] is `Auto`. The first focus or edit of the field hands
//! it to the clinician until the session is reset.

use audiora_core::models::audiogram::{ThresholdField, ThresholdRow, blank_audiogram};
use audiora_core::models::diagnosis::{INSUFFICIENT_DATA, ProvisionalDiagnosis, PtaValues};
use audiora_core::models::ear::{Ear, PerEar};
use audiora_core::models::impedance::{
    ImpedanceMeasurement, ImpedanceReport, ReflexResult, ReflexRow, TympType,
};
use audiora_core::models::session::{OverrideState, TestSession};
use audiora_core::models::speech::{SpeechAudiometry, WeberTest};

use crate::classify::compute_diagnosis;
use crate::pta::compute_pta;
use crate::tymp::classify_measurement;
use crate::weber::infer_weber;

pub const NO_PATHOLOGY: &str = "Indication of No middle ear pathology.";
pub const PATHOLOGY: &str = "Indication of Middle ear pathology.";

/// The two diagnosis fields a clinician can take over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisField {
    /// Provisional diagnosis on the pure-tone screen.
    Puretone,
    /// Diagnosis row of the impedance report.
    Impedance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ThresholdEntered {
        frequency: u32,
        field: ThresholdField,
        value: Option<f64>,
    },
    ImpedanceEntered {
        ear: Ear,
        measurement: ImpedanceMeasurement,
    },
    /// Tymp type typed directly into the results table.
    TympTypeEdited {
        ear: Ear,
        tymp_type: Option<TympType>,
    },
    DiagnosisFocused {
        field: DiagnosisField,
        ear: Ear,
    },
    DiagnosisEdited {
        field: DiagnosisField,
        ear: Ear,
        text: String,
    },
    WeberMarked {
        frequency: u32,
        ear: Ear,
        mark: String,
    },
    Reset,
}

pub fn interpretation_for(tymp_type: Option<TympType>) -> &'static str {
    match tymp_type {
        Some(TympType::A) => NO_PATHOLOGY,
        Some(TympType::As | TympType::Ad | TympType::B | TympType::C) => PATHOLOGY,
        None => "",
    }
}

pub fn reflex_for(tymp_type: Option<TympType>) -> ReflexResult {
    match tymp_type {
        Some(TympType::A) => ReflexResult::Present,
        Some(TympType::As | TympType::Ad | TympType::B | TympType::C) => ReflexResult::Absent,
        None => ReflexResult::NotAssessed,
    }
}

/// Fold one edit into the session and refresh the fields it feeds.
pub fn apply(session: &mut TestSession, event: SessionEvent) {
    match event {
        SessionEvent::ThresholdEntered {
            frequency,
            field,
            value,
        } => {
            row_mut(&mut session.audiometry_data, frequency).set(field, value);
            sync_weber(session);
            sync_puretone(session);
            sync_impedance_diagnosis(session);
        }
        SessionEvent::ImpedanceEntered { ear, measurement } => {
            *session.impedance.get_mut(ear) = measurement;
            sync_tymp_table(session);
        }
        SessionEvent::TympTypeEdited { ear, tymp_type } => {
            session.report_data.tymp.get_mut(ear).tymp_type = tymp_type;
            sync_tymp_derived(&mut session.report_data);
        }
        SessionEvent::DiagnosisFocused { field, ear } => {
            take_over(session, field, ear);
        }
        SessionEvent::DiagnosisEdited { field, ear, text } => {
            take_over(session, field, ear);
            let slot = match field {
                DiagnosisField::Puretone => session.provisional_diagnosis.get_mut(ear),
                DiagnosisField::Impedance => session.report_data.diagnosis.get_mut(ear),
            };
            *slot = text;
        }
        SessionEvent::WeberMarked {
            frequency,
            ear,
            mark,
        } => {
            session.weber_test.set(frequency, ear, mark);
        }
        SessionEvent::Reset => reset_session(session),
    }
    session.touch();
}

/// Refresh every derived field from the raw measurements.
pub fn synchronize(session: &mut TestSession) {
    sync_weber(session);
    sync_puretone(session);
    sync_tymp_table(session);
    sync_impedance_diagnosis(session);
}

/// Recompute the PTA and, for ears still on `Auto`, the provisional
/// diagnosis text. Nothing is diagnosed until some ear has a non-zero PTA;
/// the computed diagnosis is returned when it ran.
pub fn sync_puretone(session: &mut TestSession) -> Option<ProvisionalDiagnosis> {
    session.pta = compute_pta(&session.audiometry_data);
    let has_pta = |ear: Ear| matches!(*session.pta.get(ear), Some(v) if v != 0.0);
    if !Ear::BOTH.into_iter().any(has_pta) {
        return None;
    }

    let diagnosis = compute_diagnosis(&session.audiometry_data, &session.pta);
    write_unless_overridden(
        &mut session.provisional_diagnosis,
        &session.diagnosis_overrides,
        &diagnosis,
    );
    Some(diagnosis)
}

/// Apply the Weber marks implied by the bone thresholds, if any.
pub fn sync_weber(session: &mut TestSession) {
    if let Some(weber) = infer_weber(&session.audiometry_data) {
        session.weber_test = weber;
    }
}

/// Copy the impedance inputs into the results table, classify each ear,
/// and refresh interpretation and reflexes.
pub fn sync_tymp_table(session: &mut TestSession) {
    for ear in Ear::BOTH {
        let measurement = session.impedance.get(ear);
        let tymp_type = classify_measurement(measurement);
        let row = session.report_data.tymp.get_mut(ear);
        row.comp = measurement.compliance.clone();
        row.ecv = measurement.volume.clone();
        row.mep = measurement.pressure.clone();
        row.tymp_type = Some(tymp_type);
    }
    sync_tymp_derived(&mut session.report_data);
}

/// Interpretation and reflexes follow whatever type the table holds.
pub fn sync_tymp_derived(report: &mut ImpedanceReport) {
    for ear in Ear::BOTH {
        let tymp_type = report.tymp.get(ear).tymp_type;
        *report.interpretation.get_mut(ear) = interpretation_for(tymp_type).to_string();
        *report.reflex.get_mut(ear) = ReflexRow::uniform(reflex_for(tymp_type));
    }
}

/// The impedance report's diagnosis row follows the pure-tone thresholds
/// when the session carries them; otherwise it keeps its current text.
pub fn sync_impedance_diagnosis(session: &mut TestSession) {
    if !session.session_type.includes_puretone() {
        return;
    }
    let pta = compute_pta(&session.audiometry_data);
    let diagnosis = compute_diagnosis(&session.audiometry_data, &pta);
    write_unless_overridden(
        &mut session.report_data.diagnosis,
        &session.impedance_diagnosis_overrides,
        &diagnosis,
    );
}

fn write_unless_overridden(
    target: &mut PerEar<String>,
    overrides: &PerEar<OverrideState>,
    diagnosis: &ProvisionalDiagnosis,
) {
    for ear in Ear::BOTH {
        if overrides.get(ear).is_overridden() {
            continue;
        }
        *target.get_mut(ear) = diagnosis.get(ear).severity.clone();
    }
}

fn take_over(session: &mut TestSession, field: DiagnosisField, ear: Ear) {
    let state = match field {
        DiagnosisField::Puretone => session.diagnosis_overrides.get_mut(ear),
        DiagnosisField::Impedance => session.impedance_diagnosis_overrides.get_mut(ear),
    };
    if state.take_over() {
        tracing::debug!(session_id = %session.id, ear = ear.name(), ?field, "diagnosis manually overridden");
    }
}

fn row_mut(rows: &mut Vec<ThresholdRow>, frequency: u32) -> &mut ThresholdRow {
    let index = match rows.iter().position(|r| r.frequency == frequency) {
        Some(index) => index,
        None => {
            rows.push(ThresholdRow::blank(frequency));
            rows.sort_by_key(|r| r.frequency);
            rows.iter()
                .position(|r| r.frequency == frequency)
                .unwrap_or(rows.len() - 1)
        }
    };
    &mut rows[index]
}

/// Rebuild override state for a session saved without it.
///
/// A saved pure-tone diagnosis that is non-blank and not
/// "Insufficient Data" is kept (trimmed) and counts as a clinician's
/// text; anything else is cleared and left to the classifier.
pub fn restore_saved_diagnosis(session: &mut TestSession) {
    for ear in Ear::BOTH {
        let saved = session.provisional_diagnosis.get(ear).trim().to_string();
        let keep = !saved.is_empty() && saved != INSUFFICIENT_DATA;
        *session.diagnosis_overrides.get_mut(ear) = if keep {
            OverrideState::ManuallyOverridden
        } else {
            OverrideState::Auto
        };
        *session.provisional_diagnosis.get_mut(ear) = if keep { saved } else { String::new() };
    }
}

/// Clear all entered data and hand every diagnosis field back to the
/// classifier. Identity, session type and layouts are kept.
pub fn reset_session(session: &mut TestSession) {
    session.audiometry_data = blank_audiogram();
    session.pta = PtaValues::default();
    session.provisional_diagnosis = PerEar::default();
    session.diagnosis_overrides = PerEar::default();
    session.speech_audiometry = SpeechAudiometry::default();
    session.weber_test = WeberTest::blank();
    session.impedance = PerEar::default();
    session.report_data = ImpedanceReport::default();
    session.impedance_diagnosis_overrides = PerEar::default();
    tracing::info!(session_id = %session.id, "session reset");
}

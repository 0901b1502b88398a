use serde::Serialize;

use audiora_core::models::audiogram::{FREQUENCIES, ThresholdField};
use audiora_core::models::ear::{Ear, PerEar};
use audiora_core::models::impedance::TympRow;
use audiora_core::models::patient::{AudiologistProfile, Patient};
use audiora_core::models::report_format::{ReportKind, ReportLayout};
use audiora_core::models::session::TestSession;
use audiora_core::models::speech::{SpeechScores, WEBER_FREQUENCIES};

use crate::error::ExportError;

/// Everything a report template can print. Leaves are preformatted text so
/// templates never deal with missing numbers.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub kind: ReportKind,
    pub format_name: String,
    pub generated_on: String,
    /// Section toggles of the active layout, keyed as stored.
    pub sections: serde_json::Value,
    pub patient: Option<PatientLine>,
    pub audiologist: Option<AudiologistProfile>,
    pub pta: PerEar<String>,
    pub diagnosis: PerEar<String>,
    pub thresholds: Vec<ThresholdLine>,
    pub legend: PerEar<Vec<LegendEntry>>,
    pub speech: PerEar<SpeechScores>,
    pub weber: Vec<WeberLine>,
    pub tymp: PerEar<TympLine>,
    pub reflex: Vec<ReflexLine>,
    pub interpretation: PerEar<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientLine {
    pub patient_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub location: String,
}

/// One frequency of the audiogram table. Each side lists air, air masked,
/// bone, bone masked.
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdLine {
    pub frequency: u32,
    pub right: Vec<String>,
    pub left: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub key: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeberLine {
    pub frequency: u32,
    pub right: String,
    pub left: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TympLine {
    pub comp: String,
    pub ecv: String,
    pub mep: String,
    pub tymp_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReflexLine {
    pub frequency: u32,
    pub right: String,
    pub left: String,
}

impl ReportContext {
    /// Build the context for one report of `session`.
    ///
    /// `layout` replaces the session's own section toggles when it is of
    /// the same kind as the report.
    pub fn build(
        session: &TestSession,
        kind: ReportKind,
        patient: Option<&Patient>,
        audiologist: Option<&AudiologistProfile>,
        layout: Option<&ReportLayout>,
    ) -> Result<Self, ExportError> {
        let sections = match (kind, layout) {
            (ReportKind::Puretone, Some(ReportLayout::Puretone(s))) => serde_json::to_value(s)?,
            (ReportKind::Impedance, Some(ReportLayout::Impedance(s))) => serde_json::to_value(s)?,
            (ReportKind::Puretone, _) => serde_json::to_value(&session.report_sections)?,
            (ReportKind::Impedance, _) => serde_json::to_value(&session.impedance_sections)?,
        };

        let (diagnosis, recommendations) = match kind {
            ReportKind::Puretone => (
                session.provisional_diagnosis.clone(),
                if session.recommendations_enabled {
                    split_lines(&session.recommendations)
                } else {
                    Vec::new()
                },
            ),
            ReportKind::Impedance => (
                session.report_data.diagnosis.clone(),
                split_lines(&session.report_data.recommendations),
            ),
        };

        Ok(Self {
            kind,
            format_name: session.format_name.clone(),
            generated_on: jiff::Zoned::now().date().to_string(),
            sections,
            patient: patient.map(patient_line),
            audiologist: audiologist.filter(|a| !a.is_empty()).cloned(),
            pta: session
                .pta
                .clone()
                .map(|_, v| v.map(|v| format!("{v} dBHL")).unwrap_or_default()),
            diagnosis,
            thresholds: threshold_lines(session),
            legend: PerEar::new(legend(Ear::Right), legend(Ear::Left)),
            speech: session.speech_audiometry.clone(),
            weber: WEBER_FREQUENCIES
                .iter()
                .map(|&frequency| {
                    let marks = session.weber_test.get(frequency).cloned().unwrap_or_default();
                    WeberLine {
                        frequency,
                        right: marks.right,
                        left: marks.left,
                    }
                })
                .collect(),
            tymp: session.report_data.tymp.as_ref().map(|_, row| tymp_line(row)),
            reflex: session
                .report_data
                .reflex
                .right
                .entries()
                .into_iter()
                .zip(session.report_data.reflex.left.entries())
                .map(|((frequency, right), (_, left))| ReflexLine {
                    frequency,
                    right: right.to_string(),
                    left: left.to_string(),
                })
                .collect(),
            interpretation: session.report_data.interpretation.clone(),
            recommendations,
        })
    }

    /// Whether a section toggle is on. Unknown keys are off.
    pub fn section_enabled(&self, key: &str) -> bool {
        self.sections
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

fn patient_line(patient: &Patient) -> PatientLine {
    PatientLine {
        patient_id: patient.patient_id.clone(),
        name: patient.name.clone(),
        age: patient.age.to_string(),
        gender: patient.gender.clone(),
        location: patient.location.clone(),
    }
}

fn threshold_lines(session: &TestSession) -> Vec<ThresholdLine> {
    let text = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

    FREQUENCIES
        .iter()
        .map(|&frequency| {
            let row = session.row(frequency);
            let side = |ear: Ear| -> Vec<String> {
                ThresholdField::for_ear(ear)
                    .iter()
                    .map(|&field| text(row.and_then(|r| r.get(field))))
                    .collect()
            };
            ThresholdLine {
                frequency,
                right: side(Ear::Right),
                left: side(Ear::Left),
            }
        })
        .collect()
}

fn legend(ear: Ear) -> Vec<LegendEntry> {
    ThresholdField::for_ear(ear)
        .iter()
        .map(|field| LegendEntry {
            key: field.key(),
            symbol: field.symbol(),
        })
        .collect()
}

fn tymp_line(row: &TympRow) -> TympLine {
    TympLine {
        comp: row.comp.to_string(),
        ecv: row.ecv.to_string(),
        mep: row.mep.to_string(),
        tymp_type: row.tymp_type.map(|t| t.to_string()).unwrap_or_default(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

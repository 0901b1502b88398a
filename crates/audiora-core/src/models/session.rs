use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::audiogram::{ThresholdRow, blank_audiogram};
use super::diagnosis::PtaValues;
use super::ear::PerEar;
use super::impedance::{ImpedanceMeasurement, ImpedanceReport};
use super::report_format::{DEFAULT_FORMAT_NAME, ImpedanceSections, PuretoneSections};
use super::speech::{SpeechAudiometry, WeberTest};
use crate::error::CoreError;

/// Which tests a session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionKind {
    #[serde(rename = "puretone")]
    Puretone,
    #[serde(rename = "impedance")]
    Impedance,
    #[serde(rename = "puretone+impedance")]
    PuretoneImpedance,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Puretone => "puretone",
            SessionKind::Impedance => "impedance",
            SessionKind::PuretoneImpedance => "puretone+impedance",
        }
    }

    pub fn includes_puretone(self) -> bool {
        matches!(self, SessionKind::Puretone | SessionKind::PuretoneImpedance)
    }

    pub fn includes_impedance(self) -> bool {
        matches!(self, SessionKind::Impedance | SessionKind::PuretoneImpedance)
    }
}

impl FromStr for SessionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "puretone" => Ok(SessionKind::Puretone),
            "impedance" => Ok(SessionKind::Impedance),
            "puretone+impedance" => Ok(SessionKind::PuretoneImpedance),
            other => Err(CoreError::InvalidSessionKind(other.to_string())),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a derived diagnosis field still follows the classifier.
///
/// `Auto` moves to `ManuallyOverridden` on the first focus or edit and
/// only returns to `Auto` on a session reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OverrideState {
    #[default]
    Auto,
    ManuallyOverridden,
}

impl OverrideState {
    pub fn is_overridden(self) -> bool {
        self == OverrideState::ManuallyOverridden
    }

    /// Record a focus/edit. Returns `true` if this was the transition.
    pub fn take_over(&mut self) -> bool {
        let was_auto = *self == OverrideState::Auto;
        *self = OverrideState::ManuallyOverridden;
        was_auto
    }
}

/// Everything one report-editing session holds.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TestSession {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub session_type: SessionKind,

    // Pure-tone audiometry
    #[serde(default = "blank_audiogram")]
    pub audiometry_data: Vec<ThresholdRow>,
    #[serde(default)]
    pub pta: PtaValues,
    #[serde(default)]
    pub provisional_diagnosis: PerEar<String>,
    #[serde(default)]
    pub diagnosis_overrides: PerEar<OverrideState>,
    #[serde(default)]
    pub speech_audiometry: SpeechAudiometry,
    #[serde(default)]
    pub weber_test: WeberTest,
    #[serde(default)]
    pub recommendations: String,
    #[serde(default = "enabled")]
    pub recommendations_enabled: bool,

    // Impedance audiometry
    #[serde(default)]
    pub impedance: PerEar<ImpedanceMeasurement>,
    #[serde(default)]
    pub report_data: ImpedanceReport,
    #[serde(default)]
    pub impedance_diagnosis_overrides: PerEar<OverrideState>,

    // Layouts
    #[serde(default)]
    pub report_sections: PuretoneSections,
    #[serde(default)]
    pub impedance_sections: ImpedanceSections,
    #[serde(default = "default_format_name")]
    pub format_name: String,

    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

fn enabled() -> bool {
    true
}

fn default_format_name() -> String {
    DEFAULT_FORMAT_NAME.to_string()
}

impl TestSession {
    pub fn new(patient_id: Option<Uuid>, session_type: SessionKind) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            session_type,
            audiometry_data: blank_audiogram(),
            pta: PtaValues::default(),
            provisional_diagnosis: PerEar::default(),
            diagnosis_overrides: PerEar::default(),
            speech_audiometry: SpeechAudiometry::default(),
            weber_test: WeberTest::blank(),
            recommendations: String::new(),
            recommendations_enabled: true,
            impedance: PerEar::default(),
            report_data: ImpedanceReport::default(),
            impedance_diagnosis_overrides: PerEar::default(),
            report_sections: PuretoneSections::default(),
            impedance_sections: ImpedanceSections::default(),
            format_name: default_format_name(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find the threshold row for `frequency`.
    pub fn row(&self, frequency: u32) -> Option<&ThresholdRow> {
        self.audiometry_data.iter().find(|r| r.frequency == frequency)
    }

    pub fn touch(&mut self) {
        self.updated_at = jiff::Timestamp::now();
    }
}

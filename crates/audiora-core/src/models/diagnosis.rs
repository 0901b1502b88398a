use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ear::PerEar;

/// Severity text used when no PTA is available for an ear.
pub const UNABLE_TO_DETERMINE: &str = "Unable to Determine";

/// Placeholder shown on the impedance report before any diagnosis exists.
pub const NO_DATA_AVAILABLE: &str = "No data available";

/// Saved diagnosis text that is treated as "nothing saved" on load.
pub const INSUFFICIENT_DATA: &str = "Insufficient Data";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HearingLossType {
    #[default]
    Sensorineural,
    Conductive,
    Mixed,
}

impl HearingLossType {
    pub fn label(self) -> &'static str {
        match self {
            HearingLossType::Sensorineural => "Sensorineural",
            HearingLossType::Conductive => "Conductive",
            HearingLossType::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for HearingLossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provisional diagnosis for one ear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EarDiagnosis {
    #[serde(rename = "type")]
    pub hearing_loss_type: HearingLossType,
    pub severity: String,
    /// How many of 500/1000/2000 Hz had both an air and a bone value (0–3).
    pub valid_frequencies_used: u8,
}

impl Default for EarDiagnosis {
    fn default() -> Self {
        Self {
            hearing_loss_type: HearingLossType::Sensorineural,
            severity: UNABLE_TO_DETERMINE.to_string(),
            valid_frequencies_used: 0,
        }
    }
}

pub type ProvisionalDiagnosis = PerEar<EarDiagnosis>;

/// Pure-tone average per ear, dB HL rounded to one decimal.
pub type PtaValues = PerEar<Option<f64>>;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use super::diagnosis::NO_DATA_AVAILABLE;
use super::ear::PerEar;
use crate::numeric::{Reading, deserialize_reading, deserialize_reading_or};

/// Default recommendations text of a fresh impedance report.
pub const DEFAULT_IMPEDANCE_RECOMMENDATIONS: &str = "ENT Review\nFollow up";

/// Reflex test frequencies (Hz).
pub const REFLEX_FREQUENCIES: [u32; 3] = [500, 1000, 2000];

/// Peak tympanometry values for one ear, as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ImpedanceMeasurement {
    /// Middle-ear pressure, daPa.
    #[serde(deserialize_with = "pressure_or_default")]
    pub pressure: Reading,
    /// Ear-canal volume, cm³.
    #[serde(deserialize_with = "volume_or_default")]
    pub volume: Reading,
    /// Static compliance, ml.
    #[serde(deserialize_with = "compliance_or_default")]
    pub compliance: Reading,
}

const DEFAULT_PRESSURE_DAPA: f64 = 0.0;
const DEFAULT_VOLUME_CM3: f64 = 1.0;
const DEFAULT_COMPLIANCE_ML: f64 = 1.2;

impl Default for ImpedanceMeasurement {
    fn default() -> Self {
        Self {
            pressure: Reading::Number(DEFAULT_PRESSURE_DAPA),
            volume: Reading::Number(DEFAULT_VOLUME_CM3),
            compliance: Reading::Number(DEFAULT_COMPLIANCE_ML),
        }
    }
}

// Stored measurements carry `null` for untouched fields.
fn pressure_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Reading, D::Error> {
    deserialize_reading_or(d, || Reading::Number(DEFAULT_PRESSURE_DAPA))
}

fn volume_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Reading, D::Error> {
    deserialize_reading_or(d, || Reading::Number(DEFAULT_VOLUME_CM3))
}

fn compliance_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<Reading, D::Error> {
    deserialize_reading_or(d, || Reading::Number(DEFAULT_COMPLIANCE_ML))
}

/// Tympanogram classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TympType {
    /// Normal.
    A,
    /// Hypermobile.
    Ad,
    /// Hypomobile.
    As,
    /// Flat.
    B,
    /// Negative pressure.
    C,
}

impl TympType {
    pub fn label(self) -> &'static str {
        match self {
            TympType::A => "A",
            TympType::Ad => "Ad",
            TympType::As => "As",
            TympType::B => "B",
            TympType::C => "C",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "A" => Some(TympType::A),
            "Ad" => Some(TympType::Ad),
            "As" => Some(TympType::As),
            "B" => Some(TympType::B),
            "C" => Some(TympType::C),
            _ => None,
        }
    }
}

impl fmt::Display for TympType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReflexResult {
    Present,
    Absent,
    /// Not assessed.
    #[default]
    #[serde(rename = "Al")]
    NotAssessed,
}

impl ReflexResult {
    pub fn label(self) -> &'static str {
        match self {
            ReflexResult::Present => "Present",
            ReflexResult::Absent => "Absent",
            ReflexResult::NotAssessed => "Al",
        }
    }
}

impl fmt::Display for ReflexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ear's row of the tympanogram results table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TympRow {
    /// Compliance, ml.
    #[serde(deserialize_with = "deserialize_reading")]
    pub comp: Reading,
    /// Ear-canal volume, cc.
    #[serde(deserialize_with = "deserialize_reading")]
    pub ecv: Reading,
    /// Middle-ear pressure, daPa.
    #[serde(deserialize_with = "deserialize_reading")]
    pub mep: Reading,
    /// A blank or unknown label reads as no type.
    #[serde(rename = "type", deserialize_with = "deserialize_tymp_type")]
    pub tymp_type: Option<TympType>,
}

fn deserialize_tymp_type<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TympType>, D::Error> {
    let label = Option::<String>::deserialize(d)?;
    Ok(label.as_deref().and_then(TympType::from_label))
}

/// Acoustic reflex results for one ear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ReflexRow {
    #[serde(rename = "500")]
    pub hz_500: ReflexResult,
    #[serde(rename = "1000")]
    pub hz_1000: ReflexResult,
    #[serde(rename = "2000")]
    pub hz_2000: ReflexResult,
}

impl ReflexRow {
    pub fn uniform(result: ReflexResult) -> Self {
        Self {
            hz_500: result,
            hz_1000: result,
            hz_2000: result,
        }
    }

    /// `(frequency, result)` pairs in ascending frequency order.
    pub fn entries(&self) -> [(u32, ReflexResult); 3] {
        [
            (REFLEX_FREQUENCIES[0], self.hz_500),
            (REFLEX_FREQUENCIES[1], self.hz_1000),
            (REFLEX_FREQUENCIES[2], self.hz_2000),
        ]
    }
}

/// Editable fields of the impedance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ImpedanceReport {
    pub tymp: PerEar<TympRow>,
    pub reflex: PerEar<ReflexRow>,
    pub interpretation: PerEar<String>,
    pub diagnosis: PerEar<String>,
    pub recommendations: String,
}

impl Default for ImpedanceReport {
    fn default() -> Self {
        Self {
            tymp: PerEar::default(),
            reflex: PerEar::default(),
            interpretation: PerEar::default(),
            diagnosis: PerEar::both(NO_DATA_AVAILABLE.to_string()),
            recommendations: DEFAULT_IMPEDANCE_RECOMMENDATIONS.to_string(),
        }
    }
}

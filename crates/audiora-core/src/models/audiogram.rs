use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ear::Ear;
use crate::numeric::deserialize_threshold;

/// Test frequencies (Hz) of the pure-tone audiogram, in chart order.
pub const FREQUENCIES: [u32; 9] = [250, 500, 1000, 1500, 2000, 3000, 4000, 6000, 8000];

/// Frequencies averaged for the pure-tone average.
pub const PTA_FREQUENCIES: [u32; 3] = [500, 1000, 2000];

/// The eight threshold columns of the audiogram entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ThresholdField {
    #[serde(rename = "ACR")]
    AirRight,
    #[serde(rename = "ACR_M")]
    AirRightMasked,
    #[serde(rename = "BCR")]
    BoneRight,
    #[serde(rename = "BCR_M")]
    BoneRightMasked,
    #[serde(rename = "ACL")]
    AirLeft,
    #[serde(rename = "ACL_M")]
    AirLeftMasked,
    #[serde(rename = "BCL")]
    BoneLeft,
    #[serde(rename = "BCL_M")]
    BoneLeftMasked,
}

impl ThresholdField {
    pub const ALL: [ThresholdField; 8] = [
        ThresholdField::AirRight,
        ThresholdField::AirRightMasked,
        ThresholdField::BoneRight,
        ThresholdField::BoneRightMasked,
        ThresholdField::AirLeft,
        ThresholdField::AirLeftMasked,
        ThresholdField::BoneLeft,
        ThresholdField::BoneLeftMasked,
    ];

    /// Column key as stored ("ACR", "BCL_M", ...).
    pub fn key(self) -> &'static str {
        match self {
            ThresholdField::AirRight => "ACR",
            ThresholdField::AirRightMasked => "ACR_M",
            ThresholdField::BoneRight => "BCR",
            ThresholdField::BoneRightMasked => "BCR_M",
            ThresholdField::AirLeft => "ACL",
            ThresholdField::AirLeftMasked => "ACL_M",
            ThresholdField::BoneLeft => "BCL",
            ThresholdField::BoneLeftMasked => "BCL_M",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Standard audiogram symbol for the legend.
    pub fn symbol(self) -> &'static str {
        match self {
            ThresholdField::AirRight => "○",
            ThresholdField::AirRightMasked => "△",
            ThresholdField::BoneRight => "<",
            ThresholdField::BoneRightMasked => "⊏",
            ThresholdField::AirLeft => "×",
            ThresholdField::AirLeftMasked => "□",
            ThresholdField::BoneLeft => ">",
            ThresholdField::BoneLeftMasked => "⊐",
        }
    }

    pub fn ear(self) -> Ear {
        match self {
            ThresholdField::AirRight
            | ThresholdField::AirRightMasked
            | ThresholdField::BoneRight
            | ThresholdField::BoneRightMasked => Ear::Right,
            _ => Ear::Left,
        }
    }

    pub fn is_masked(self) -> bool {
        matches!(
            self,
            ThresholdField::AirRightMasked
                | ThresholdField::BoneRightMasked
                | ThresholdField::AirLeftMasked
                | ThresholdField::BoneLeftMasked
        )
    }

    /// The four columns belonging to one ear, in table order.
    pub fn for_ear(ear: Ear) -> [ThresholdField; 4] {
        match ear {
            Ear::Right => [
                ThresholdField::AirRight,
                ThresholdField::AirRightMasked,
                ThresholdField::BoneRight,
                ThresholdField::BoneRightMasked,
            ],
            Ear::Left => [
                ThresholdField::AirLeft,
                ThresholdField::AirLeftMasked,
                ThresholdField::BoneLeft,
                ThresholdField::BoneLeftMasked,
            ],
        }
    }
}

/// Thresholds (dB HL) recorded at one test frequency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThresholdRow {
    #[serde(rename = "freq")]
    pub frequency: u32,
    #[serde(rename = "ACR", default, deserialize_with = "deserialize_threshold")]
    pub air_right: Option<f64>,
    #[serde(rename = "ACR_M", default, deserialize_with = "deserialize_threshold")]
    pub air_right_masked: Option<f64>,
    #[serde(rename = "BCR", default, deserialize_with = "deserialize_threshold")]
    pub bone_right: Option<f64>,
    #[serde(rename = "BCR_M", default, deserialize_with = "deserialize_threshold")]
    pub bone_right_masked: Option<f64>,
    #[serde(rename = "ACL", default, deserialize_with = "deserialize_threshold")]
    pub air_left: Option<f64>,
    #[serde(rename = "ACL_M", default, deserialize_with = "deserialize_threshold")]
    pub air_left_masked: Option<f64>,
    #[serde(rename = "BCL", default, deserialize_with = "deserialize_threshold")]
    pub bone_left: Option<f64>,
    #[serde(rename = "BCL_M", default, deserialize_with = "deserialize_threshold")]
    pub bone_left_masked: Option<f64>,
}

impl ThresholdRow {
    pub fn blank(frequency: u32) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn get(&self, field: ThresholdField) -> Option<f64> {
        match field {
            ThresholdField::AirRight => self.air_right,
            ThresholdField::AirRightMasked => self.air_right_masked,
            ThresholdField::BoneRight => self.bone_right,
            ThresholdField::BoneRightMasked => self.bone_right_masked,
            ThresholdField::AirLeft => self.air_left,
            ThresholdField::AirLeftMasked => self.air_left_masked,
            ThresholdField::BoneLeft => self.bone_left,
            ThresholdField::BoneLeftMasked => self.bone_left_masked,
        }
    }

    pub fn set(&mut self, field: ThresholdField, value: Option<f64>) {
        let slot = match field {
            ThresholdField::AirRight => &mut self.air_right,
            ThresholdField::AirRightMasked => &mut self.air_right_masked,
            ThresholdField::BoneRight => &mut self.bone_right,
            ThresholdField::BoneRightMasked => &mut self.bone_right_masked,
            ThresholdField::AirLeft => &mut self.air_left,
            ThresholdField::AirLeftMasked => &mut self.air_left_masked,
            ThresholdField::BoneLeft => &mut self.bone_left,
            ThresholdField::BoneLeftMasked => &mut self.bone_left_masked,
        };
        *slot = value;
    }

    /// Unmasked air-conduction threshold.
    pub fn air(&self, ear: Ear) -> Option<f64> {
        match ear {
            Ear::Right => self.air_right,
            Ear::Left => self.air_left,
        }
    }

    /// Unmasked bone-conduction threshold.
    pub fn bone(&self, ear: Ear) -> Option<f64> {
        match ear {
            Ear::Right => self.bone_right,
            Ear::Left => self.bone_left,
        }
    }

    pub fn bone_masked(&self, ear: Ear) -> Option<f64> {
        match ear {
            Ear::Right => self.bone_right_masked,
            Ear::Left => self.bone_left_masked,
        }
    }
}

/// One empty row per test frequency.
pub fn blank_audiogram() -> Vec<ThresholdRow> {
    FREQUENCIES.iter().map(|&f| ThresholdRow::blank(f)).collect()
}

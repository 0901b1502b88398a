use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ear::{Ear, PerEar};

/// Frequencies (Hz) at which the Weber test is recorded.
pub const WEBER_FREQUENCIES: [u32; 4] = [250, 500, 1000, 2000];

/// Mark written into the lateralized side of a Weber entry.
pub const LATERALIZED: &str = "→";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SpeechScores {
    pub pta: String,
    /// Speech recognition threshold.
    pub srt: String,
    /// Speech discrimination score.
    pub sds: String,
}

pub type SpeechAudiometry = PerEar<SpeechScores>;

/// Weber lateralization marks keyed by frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeberTest(pub BTreeMap<u32, PerEar<String>>);

impl WeberTest {
    pub fn blank() -> Self {
        Self::filled(PerEar::default())
    }

    /// Every Weber frequency lateralized to `ear`.
    pub fn lateralized(ear: Ear) -> Self {
        let mut marks = PerEar::<String>::default();
        *marks.get_mut(ear) = LATERALIZED.to_string();
        Self::filled(marks)
    }

    fn filled(marks: PerEar<String>) -> Self {
        Self(
            WEBER_FREQUENCIES
                .iter()
                .map(|&f| (f, marks.clone()))
                .collect(),
        )
    }

    pub fn set(&mut self, frequency: u32, ear: Ear, mark: impl Into<String>) {
        *self.0.entry(frequency).or_default().get_mut(ear) = mark.into();
    }

    pub fn get(&self, frequency: u32) -> Option<&PerEar<String>> {
        self.0.get(&frequency)
    }
}

impl Default for WeberTest {
    fn default() -> Self {
        Self::blank()
    }
}

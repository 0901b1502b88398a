use audiora_core::models::audiogram::{PTA_FREQUENCIES, ThresholdRow};
use audiora_core::models::diagnosis::{
    EarDiagnosis, HearingLossType, ProvisionalDiagnosis, PtaValues, UNABLE_TO_DETERMINE,
};
use audiora_core::models::ear::{Ear, PerEar};

/// Air-bone gaps and bone thresholds above this (dB, strict) are significant.
pub const SIGNIFICANT_DB: f64 = 15.0;

/// Severity bands of the pure-tone average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityBand {
    Normal,
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
    Profound,
}

/// Inclusive upper bounds, ascending. Anything above the last is profound.
const BANDS: [(f64, SeverityBand); 6] = [
    (15.0, SeverityBand::Normal),
    (25.0, SeverityBand::Minimal),
    (40.0, SeverityBand::Mild),
    (55.0, SeverityBand::Moderate),
    (70.0, SeverityBand::ModeratelySevere),
    (90.0, SeverityBand::Severe),
];

impl SeverityBand {
    pub fn from_pta(pta: f64) -> Self {
        BANDS
            .iter()
            .find(|(upper, _)| pta <= *upper)
            .map(|(_, band)| *band)
            .unwrap_or(SeverityBand::Profound)
    }

    /// Report wording. The loss-type word in the middle bands is
    /// "Sensorineural" and gets relabeled by [`severity_text`].
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Normal => "Normal Hearing Sensitivity",
            SeverityBand::Minimal => "Minimal Hearing Loss",
            SeverityBand::Mild => "Mild Sensorineural Hearing Loss",
            SeverityBand::Moderate => "Moderate Sensorineural Hearing Loss",
            SeverityBand::ModeratelySevere => "Moderately Severe Sensorineural Hearing Loss",
            SeverityBand::Severe => "Severe Sensorineural Hearing Loss",
            SeverityBand::Profound => "Profound Hearing Loss",
        }
    }
}

/// Severity wording for an ear.
///
/// Only labels that mention "Sensorineural" are relabeled for conductive
/// or mixed losses; Normal, Minimal and Profound keep their wording
/// whatever the type.
pub fn severity_text(pta: Option<f64>, loss_type: HearingLossType) -> String {
    let Some(pta) = pta else {
        return UNABLE_TO_DETERMINE.to_string();
    };
    let label = SeverityBand::from_pta(pta).label();
    match loss_type {
        HearingLossType::Conductive | HearingLossType::Mixed
            if label.contains(HearingLossType::Sensorineural.label()) =>
        {
            label.replacen(HearingLossType::Sensorineural.label(), loss_type.label(), 1)
        }
        _ => label.to_string(),
    }
}

/// What the 500/1000/2000 Hz air and bone thresholds say about one ear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AirBoneFindings {
    pub valid_frequencies: u8,
    /// Some frequency had an air-bone gap above 15 dB.
    pub gap_over_15: bool,
    /// Some frequency had a bone threshold above 15 dB HL.
    pub bone_over_15: bool,
}

impl AirBoneFindings {
    pub fn loss_type(&self) -> HearingLossType {
        match (self.gap_over_15, self.bone_over_15) {
            (true, true) => HearingLossType::Mixed,
            (true, false) => HearingLossType::Conductive,
            _ => HearingLossType::Sensorineural,
        }
    }
}

/// Bone threshold for a row: masked wins over unmasked.
pub fn resolve_bone(row: &ThresholdRow, ear: Ear) -> Option<f64> {
    row.bone_masked(ear).or_else(|| row.bone(ear))
}

pub fn air_bone_findings(rows: &[ThresholdRow], ear: Ear) -> AirBoneFindings {
    let mut findings = AirBoneFindings::default();

    for freq in PTA_FREQUENCIES {
        let Some(row) = rows.iter().find(|r| r.frequency == freq) else {
            continue;
        };
        let (Some(air), Some(bone)) = (row.air(ear), resolve_bone(row, ear)) else {
            continue;
        };

        findings.valid_frequencies += 1;
        if air - bone > SIGNIFICANT_DB {
            findings.gap_over_15 = true;
        }
        if bone > SIGNIFICANT_DB {
            findings.bone_over_15 = true;
        }
    }

    findings
}

pub fn classify_ear(rows: &[ThresholdRow], ear: Ear, pta: Option<f64>) -> EarDiagnosis {
    let findings = air_bone_findings(rows, ear);
    let loss_type = findings.loss_type();
    EarDiagnosis {
        hearing_loss_type: loss_type,
        severity: severity_text(pta, loss_type),
        valid_frequencies_used: findings.valid_frequencies,
    }
}

/// Provisional diagnosis for both ears.
pub fn compute_diagnosis(rows: &[ThresholdRow], pta: &PtaValues) -> ProvisionalDiagnosis {
    PerEar::new(
        classify_ear(rows, Ear::Right, pta.right),
        classify_ear(rows, Ear::Left, pta.left),
    )
}

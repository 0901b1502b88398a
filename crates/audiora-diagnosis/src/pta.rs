use audiora_core::models::audiogram::{PTA_FREQUENCIES, ThresholdRow};
use audiora_core::models::diagnosis::PtaValues;
use audiora_core::models::ear::{Ear, PerEar};

/// Pure-tone average per ear: mean of the unmasked air-conduction
/// thresholds present at 500, 1000 and 2000 Hz, rounded to one decimal.
/// `None` for an ear with no value at any of those frequencies.
pub fn compute_pta(rows: &[ThresholdRow]) -> PtaValues {
    PerEar::new(ear_pta(rows, Ear::Right), ear_pta(rows, Ear::Left))
}

fn ear_pta(rows: &[ThresholdRow], ear: Ear) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter(|r| PTA_FREQUENCIES.contains(&r.frequency))
        .filter_map(|r| r.air(ear))
        .collect();

    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round_one_decimal(mean))
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

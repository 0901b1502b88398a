use audiora_core::models::impedance::{ImpedanceMeasurement, TympType};
use audiora_core::numeric::Reading;

/// Peak values the rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TympPeak {
    pub pressure: f64,
    pub compliance: f64,
    pub volume: f64,
}

impl TympPeak {
    /// NaN and infinities are treated like unparseable input and become 0.
    pub fn new(pressure: f64, compliance: f64, volume: f64) -> Self {
        let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            pressure: clean(pressure),
            compliance: clean(compliance),
            volume: clean(volume),
        }
    }
}

pub struct TympRule {
    pub tymp_type: TympType,
    pub matches: fn(&TympPeak) -> bool,
}

fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

fn normal_pressure(p: &TympPeak) -> bool {
    within(p.pressure, -100.0, 100.0)
}

fn normal_volume(p: &TympPeak) -> bool {
    within(p.volume, 0.5, 2.9)
}

/// Evaluated in order; the first match wins. The ranges overlap at their
/// edges (compliance 0.3 is both A and As), so the order is part of the
/// classification.
pub const RULES: [TympRule; 5] = [
    TympRule {
        tymp_type: TympType::A,
        matches: |p| normal_pressure(p) && within(p.compliance, 0.3, 2.5) && normal_volume(p),
    },
    TympRule {
        tymp_type: TympType::Ad,
        matches: |p| normal_pressure(p) && p.compliance > 2.75 && normal_volume(p),
    },
    TympRule {
        tymp_type: TympType::As,
        matches: |p| normal_pressure(p) && within(p.compliance, 0.2, 0.3) && normal_volume(p),
    },
    TympRule {
        tymp_type: TympType::B,
        matches: |p| p.pressure < -200.0 && p.compliance < 0.2 && normal_volume(p),
    },
    TympRule {
        tymp_type: TympType::C,
        matches: |p| {
            (p.pressure < -100.0 || p.pressure > 100.0)
                && within(p.compliance, 0.3, 2.5)
                && normal_volume(p)
        },
    },
];

/// Anything no rule claims, including an out-of-range ear-canal volume.
pub const FALLBACK: TympType = TympType::B;

pub fn classify_peak(peak: &TympPeak) -> TympType {
    RULES
        .iter()
        .find(|rule| (rule.matches)(peak))
        .map(|rule| rule.tymp_type)
        .unwrap_or(FALLBACK)
}

/// Classify raw form readings. Unparseable readings count as 0.
pub fn classify_tymp_type(pressure: &Reading, compliance: &Reading, volume: &Reading) -> TympType {
    classify_peak(&TympPeak::new(
        pressure.coerce(),
        compliance.coerce(),
        volume.coerce(),
    ))
}

pub fn classify_measurement(measurement: &ImpedanceMeasurement) -> TympType {
    classify_tymp_type(
        &measurement.pressure,
        &measurement.compliance,
        &measurement.volume,
    )
}

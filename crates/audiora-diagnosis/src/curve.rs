use serde::Serialize;
use ts_rs::TS;

use audiora_core::models::impedance::ImpedanceMeasurement;

pub const PRESSURE_MIN_DAPA: i32 = -300;
pub const PRESSURE_MAX_DAPA: i32 = 200;
pub const PRESSURE_STEP_DAPA: i32 = 5;

/// Width of the drawn peak.
pub const PEAK_STD_DEV_DAPA: f64 = 40.0;

/// Peak height used when the compliance reading is blank or zero.
pub const FALLBACK_COMPLIANCE_ML: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CurvePoint {
    pub pressure: f64,
    pub compliance: f64,
}

/// The dashed box marking the normal tympanogram region on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct NormalRegion {
    pub pressure_min: f64,
    pub pressure_max: f64,
    pub compliance_min: f64,
    pub compliance_max: f64,
}

pub const NORMAL_REGION: NormalRegion = NormalRegion {
    pressure_min: -150.0,
    pressure_max: 100.0,
    compliance_min: 0.12,
    compliance_max: 1.5,
};

/// Sample an idealized tympanogram: a Gaussian peak at the measured
/// pressure with the measured compliance as its height, from -300 to
/// +200 daPa every 5 daPa.
pub fn tympanogram_curve(measurement: &ImpedanceMeasurement) -> Vec<CurvePoint> {
    let peak_pressure = measurement.pressure.coerce();
    let peak_compliance = measurement
        .compliance
        .as_f64()
        .filter(|c| *c != 0.0)
        .unwrap_or(FALLBACK_COMPLIANCE_ML);
    let two_var = 2.0 * PEAK_STD_DEV_DAPA * PEAK_STD_DEV_DAPA;

    (PRESSURE_MIN_DAPA..=PRESSURE_MAX_DAPA)
        .step_by(PRESSURE_STEP_DAPA as usize)
        .map(|p| {
            let p = f64::from(p);
            let y = peak_compliance * (-(p - peak_pressure).powi(2) / two_var).exp();
            CurvePoint {
                pressure: p,
                compliance: y.max(0.0),
            }
        })
        .collect()
}

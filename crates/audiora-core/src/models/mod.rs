pub mod audiogram;
pub mod diagnosis;
pub mod ear;
pub mod impedance;
pub mod patient;
pub mod report_format;
pub mod session;
pub mod speech;

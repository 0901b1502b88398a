use serde::{Deserialize, Serialize};

/// Document styling for exported reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Calibri").
    pub body_font: String,

    /// Font for headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points.
    pub heading1_size: usize,

    /// Heading 2 font size in points.
    pub heading2_size: usize,

    /// Heading 3 font size in points.
    pub heading3_size: usize,

    /// Page margin in inches (applied uniformly).
    pub margin_inches: f64,

    /// Clinic letterhead printed in the page header.
    pub header_text: Option<String>,
}

impl DocumentStyles {
    /// Margin in twentieths of a point, as OOXML wants it.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_inches.max(0.0) * 1440.0).round() as i32
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading1_size: 16,
            heading2_size: 13,
            heading3_size: 11,
            margin_inches: 0.75,
            header_text: None,
        }
    }
}

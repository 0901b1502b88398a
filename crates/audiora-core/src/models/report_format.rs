use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Name shown for the built-in layout that enables everything.
pub const DEFAULT_FORMAT_NAME: &str = "Default (Full)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportKind {
    Puretone,
    Impedance,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Puretone => "puretone",
            ReportKind::Impedance => "impedance",
        }
    }
}

/// Section toggles of the pure-tone audiometry report.
///
/// The `front_*` keys control the optional summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PuretoneSections {
    pub front_page: bool,
    pub front_patient_info: bool,
    pub front_provisional_diagnosis: bool,
    pub front_speech_audiometry: bool,
    pub front_weber_test: bool,
    pub front_recommendations: bool,
    pub front_audiologist_details: bool,
    pub patient_info: bool,
    pub right_ear_graph: bool,
    pub left_ear_graph: bool,
    pub symbols_legend_right: bool,
    pub symbols_legend_left: bool,
    pub provisional_diagnosis: bool,
    pub speech_audiometry: bool,
    pub weber_test: bool,
    pub recommendations: bool,
    pub audiologist_details: bool,
}

impl Default for PuretoneSections {
    fn default() -> Self {
        Self {
            front_page: true,
            front_patient_info: true,
            front_provisional_diagnosis: true,
            front_speech_audiometry: false,
            front_weber_test: false,
            front_recommendations: true,
            front_audiologist_details: true,
            patient_info: true,
            right_ear_graph: true,
            left_ear_graph: true,
            symbols_legend_right: true,
            symbols_legend_left: true,
            provisional_diagnosis: true,
            speech_audiometry: true,
            weber_test: true,
            recommendations: true,
            audiologist_details: true,
        }
    }
}

impl PuretoneSections {
    /// `(key, label, enabled)` for every toggle, in selector order.
    pub fn entries(&self) -> Vec<(&'static str, &'static str, bool)> {
        vec![
            ("front_page", "Include Front Page", self.front_page),
            ("front_patient_info", "Front Page: Patient Info", self.front_patient_info),
            (
                "front_provisional_diagnosis",
                "Front Page: Provisional Diagnosis",
                self.front_provisional_diagnosis,
            ),
            (
                "front_speech_audiometry",
                "Front Page: Speech Audiometry",
                self.front_speech_audiometry,
            ),
            ("front_weber_test", "Front Page: Weber Test", self.front_weber_test),
            (
                "front_recommendations",
                "Front Page: Recommendations",
                self.front_recommendations,
            ),
            (
                "front_audiologist_details",
                "Front Page: Audiologist Details",
                self.front_audiologist_details,
            ),
            ("patient_info", "Patient Info", self.patient_info),
            ("right_ear_graph", "Right Ear Graph", self.right_ear_graph),
            ("left_ear_graph", "Left Ear Graph", self.left_ear_graph),
            ("symbols_legend_right", "Symbols Legend (Right)", self.symbols_legend_right),
            ("symbols_legend_left", "Symbols Legend (Left)", self.symbols_legend_left),
            ("provisional_diagnosis", "Provisional Diagnosis", self.provisional_diagnosis),
            ("speech_audiometry", "Speech Audiometry", self.speech_audiometry),
            ("weber_test", "Weber Test", self.weber_test),
            ("recommendations", "Recommendations", self.recommendations),
            ("audiologist_details", "Audiologist Details", self.audiologist_details),
        ]
    }
}

/// Section toggles of the impedance audiometry report. All default on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ImpedanceSections {
    pub patient_info: bool,
    pub right_tympanogram: bool,
    pub left_tympanogram: bool,
    pub tymp_results_table: bool,
    pub acoustic_reflex: bool,
    pub interpretation: bool,
    pub provisional_diagnosis: bool,
    pub recommendations: bool,
    pub audiologist_details: bool,
}

impl Default for ImpedanceSections {
    fn default() -> Self {
        Self {
            patient_info: true,
            right_tympanogram: true,
            left_tympanogram: true,
            tymp_results_table: true,
            acoustic_reflex: true,
            interpretation: true,
            provisional_diagnosis: true,
            recommendations: true,
            audiologist_details: true,
        }
    }
}

impl ImpedanceSections {
    pub fn entries(&self) -> Vec<(&'static str, &'static str, bool)> {
        vec![
            ("patient_info", "Patient Information", self.patient_info),
            ("right_tympanogram", "Right Tympanogram Graph", self.right_tympanogram),
            ("left_tympanogram", "Left Tympanogram Graph", self.left_tympanogram),
            ("tymp_results_table", "Tympanogram Results Table", self.tymp_results_table),
            ("acoustic_reflex", "Acoustic Reflex Table", self.acoustic_reflex),
            ("interpretation", "Interpretation", self.interpretation),
            ("provisional_diagnosis", "Provisional Diagnosis", self.provisional_diagnosis),
            ("recommendations", "Recommendations", self.recommendations),
            ("audiologist_details", "Audiologist Details", self.audiologist_details),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "sections", rename_all = "snake_case")]
#[ts(export)]
pub enum ReportLayout {
    Puretone(PuretoneSections),
    Impedance(ImpedanceSections),
}

impl ReportLayout {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportLayout::Puretone(_) => ReportKind::Puretone,
            ReportLayout::Impedance(_) => ReportKind::Impedance,
        }
    }
}

/// A named, user-saved section layout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportFormat {
    pub id: Uuid,
    pub name: String,
    pub layout: ReportLayout,
    pub created_at: jiff::Timestamp,
}

impl ReportFormat {
    pub fn new(name: impl Into<String>, layout: ReportLayout) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layout,
            created_at: jiff::Timestamp::now(),
        }
    }
}

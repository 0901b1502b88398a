use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use audiora_core::models::patient::AudiologistProfile;
use audiora_core::models::report_format::{ReportFormat, ReportKind};
use audiora_export::styles::DocumentStyles;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Audiologist fields that pre-versioned configs kept at the top level.
const V0_PROFILE_KEYS: [&str; 5] = ["name", "reg_no", "qualification", "phone_number", "address"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioraConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub audiologist: AudiologistProfile,
    #[serde(default)]
    pub styles: DocumentStyles,
    /// Saved section layouts, selectable by name at export time.
    #[serde(default)]
    pub report_formats: Vec<ReportFormat>,
    /// Where patient and session records live. Defaults to the platform
    /// data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub created_at: jiff::Timestamp,
}

impl Default for AudioraConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            audiologist: AudiologistProfile::default(),
            styles: DocumentStyles::default(),
            report_formats: Vec::new(),
            data_dir: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl AudioraConfig {
    /// Look up a saved layout by name for a report kind. Names compare
    /// case-insensitively.
    pub fn find_format(&self, name: &str, kind: ReportKind) -> Option<&ReportFormat> {
        self.report_formats
            .iter()
            .find(|f| f.layout.kind() == kind && f.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Add a layout, replacing any saved one with the same name and kind.
    pub fn upsert_format(&mut self, format: ReportFormat) {
        let kind = format.layout.kind();
        self.report_formats
            .retain(|f| !(f.layout.kind() == kind && f.name.eq_ignore_ascii_case(&format.name)));
        self.report_formats.push(format);
    }
}

/// Config details for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub path: String,
    pub config_version: u32,
    pub created_at: String,
    pub audiologist: Option<String>,
    pub body_font: String,
    pub header_text: Option<String>,
    pub report_formats: Vec<String>,
    pub data_dir: Option<String>,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.audiora.cli"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("com.audiora.cli"))
}

pub fn load_config(path: &Path) -> eyre::Result<AudioraConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: AudioraConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config at `path`, or a fresh default when none exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<AudioraConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(AudioraConfig::default())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Audiora."
        ));
    }

    // v0 → v1: audiologist fields move under `audiologist`; saved layouts start empty
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        let mut profile = serde_json::Map::new();
        for key in V0_PROFILE_KEYS {
            if let Some(value) = obj.remove(key) {
                profile.insert(key.to_string(), value);
            }
        }
        obj.entry("audiologist")
            .or_insert(serde_json::Value::Object(profile));
        obj.entry("report_formats")
            .or_insert(serde_json::Value::Array(Vec::new()));
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested audiologist profile)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &AudioraConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_summary(path: &Path, config: &AudioraConfig) -> ConfigSummary {
    let audiologist = (!config.audiologist.is_empty()).then(|| {
        if config.audiologist.reg_no.is_empty() {
            config.audiologist.name.clone()
        } else {
            format!(
                "{} (Reg. No. {})",
                config.audiologist.name, config.audiologist.reg_no
            )
        }
    });

    ConfigSummary {
        path: path.display().to_string(),
        config_version: config.config_version,
        created_at: config.created_at.to_string(),
        audiologist,
        body_font: config.styles.body_font.clone(),
        header_text: config.styles.header_text.clone(),
        report_formats: config
            .report_formats
            .iter()
            .map(|f| format!("{} [{}]", f.name, f.layout.kind().as_str()))
            .collect(),
        data_dir: config.data_dir.as_ref().map(|d| d.display().to_string()),
    }
}

use audiora_cli::config::{
    AudioraConfig, CURRENT_VERSION, config_summary, load_config, load_or_default, migrate,
    save_config,
};
use audiora_core::models::report_format::{PuretoneSections, ReportFormat, ReportKind, ReportLayout};
use audiora_export::styles::DocumentStyles;

#[test]
fn unversioned_config_moves_profile_under_audiologist() {
    let v0 = serde_json::json!({
        "name": "Dr. R. Iyer",
        "reg_no": "A12345",
        "created_at": "2025-01-02T03:04:05Z",
    });

    let migrated = migrate(v0, 0).unwrap();
    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["audiologist"]["name"], "Dr. R. Iyer");
    assert!(migrated.get("name").is_none());
    assert_eq!(migrated["report_formats"], serde_json::json!([]));

    let config: AudioraConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(config.audiologist.reg_no, "A12345");
}

#[test]
fn newer_config_is_rejected() {
    let err = migrate(serde_json::json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn save_then_load_stamps_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = AudioraConfig::default();
    config.config_version = 0;
    config.audiologist.name = "Dr. R. Iyer".to_string();
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.audiologist.name, "Dr. R. Iyer");
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn v0_file_on_disk_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"name": "Dr. A", "qualification": "BASLP"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.audiologist.qualification, "BASLP");
    assert_eq!(config.styles, DocumentStyles::default());
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("absent.json")).unwrap();
    assert!(config.audiologist.is_empty());
    assert!(config.report_formats.is_empty());
}

#[test]
fn formats_are_found_by_name_and_kind() {
    let mut config = AudioraConfig::default();
    config.upsert_format(ReportFormat::new(
        "Short",
        ReportLayout::Puretone(PuretoneSections::default()),
    ));
    config.upsert_format(ReportFormat::new(
        "short",
        ReportLayout::Puretone(PuretoneSections {
            weber_test: false,
            ..PuretoneSections::default()
        }),
    ));

    assert_eq!(config.report_formats.len(), 1);
    let found = config.find_format(" SHORT ", ReportKind::Puretone).unwrap();
    assert!(matches!(&found.layout, ReportLayout::Puretone(s) if !s.weber_test));
    assert!(config.find_format("short", ReportKind::Impedance).is_none());

    let summary = config_summary(std::path::Path::new("/tmp/config.json"), &config);
    assert_eq!(summary.report_formats, vec!["short [puretone]"]);
    assert!(summary.audiologist.is_none());
}

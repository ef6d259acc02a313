use hookcut_core::config::CoreConfigBuilder;
use std::path::PathBuf;

#[test]
fn test_builder_pattern() {
    let config = CoreConfigBuilder::new()
        .input_dir(PathBuf::from("clips"))
        .output_dir(PathBuf::from("edited"))
        .assets_dir(PathBuf::from("/srv/hookcut/assets"))
        .sheet_id("abc123")
        .worksheet_name("Captions")
        .build();

    assert_eq!(config.input_dir, PathBuf::from("clips"));
    assert_eq!(config.output_dir, PathBuf::from("edited"));
    assert_eq!(config.credentials_path, PathBuf::from("/srv/hookcut/assets/credentials.json"));
    assert_eq!(config.font_path, PathBuf::from("/srv/hookcut/assets/TikTokDisplay-Medium.ttf"));
    assert_eq!(config.require_sheet_id().unwrap(), "abc123");
    assert_eq!(config.worksheet_name, "Captions");
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder_rejects_nothing_until_validate() {
    let config = CoreConfigBuilder::new().start_trim(-1.0).build();
    assert!(config.validate().is_err());
    assert!(config.require_sheet_id().is_err());
}

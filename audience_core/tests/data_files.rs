use std::path::PathBuf;

use audience_core::{SegmentCatalog, SizingConfig};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src").join("data")
}

/// The shipped data files must stay in sync with the compiled-in copies.
#[test]
fn sizing_config_file_matches_defaults() {
    let from_file =
        SizingConfig::from_file(&data_dir().join("sizing_config.json")).expect("config parses");
    assert_eq!(from_file, SizingConfig::default());
    assert_eq!(*SizingConfig::builtin(), from_file);
}

#[test]
fn provider_file_loads_every_segment() {
    let catalog =
        SegmentCatalog::from_file(&data_dir().join("providers.json")).expect("catalog parses");
    assert_eq!(catalog.len(), SegmentCatalog::builtin().len());
    assert_eq!(
        catalog.provider_names(),
        vec!["CCS", "Circana", "Experian", "Vodafone", "ONS"]
    );
    for segment in catalog.segments() {
        let expected = format!("{}_{}", segment.provider_id, segment.id);
        assert_eq!(segment.unique_id.as_str(), expected);
    }
}

#[test]
fn missing_file_reports_path() {
    let err = SizingConfig::from_file(&data_dir().join("does_not_exist.json"))
        .expect_err("missing file");
    assert!(err.to_string().contains("does_not_exist.json"));
}

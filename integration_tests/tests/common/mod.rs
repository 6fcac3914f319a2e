#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Once};

use audience_core::{
    load_sizing_config_from_env, AudienceSession, SegmentCatalog, SizingConfig, SIZING_CONFIG_ENV,
};

static INIT: Once = Once::new();

/// Point the config loader at the fixed-discount fixture.
pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("test_sizing_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test sizing config at {}",
            config_path.display()
        );

        std::env::set_var(SIZING_CONFIG_ENV, &config_path);
    });
}

pub fn test_config() -> Arc<SizingConfig> {
    ensure_test_config();
    let (config, metadata) = load_sizing_config_from_env();
    debug_assert!(metadata.path().is_some(), "fixture config not loaded");
    config
}

pub fn new_session(seed: u64) -> AudienceSession {
    AudienceSession::new(SegmentCatalog::builtin(), test_config(), seed)
}

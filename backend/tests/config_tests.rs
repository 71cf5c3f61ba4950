mod support;

use std::path::PathBuf;

use sky_map::config::SkyConfig;
use sky_map::SkyError;

use support::with_scoped_env;

#[test]
fn test_env_overrides_apply_on_top_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sky.toml");
    std::fs::write(
        &path,
        "[server]\nport = 3000\n\n[constellations]\ncache_path = \"figures.json\"\n",
    )
    .unwrap();

    let config = with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", None),
            ("SKY_CACHE_PATH", Some("/srv/sky/figures.json")),
            ("SKY_VIZIER_URL", None),
            ("SKY_FIGURES_URL", None),
        ],
        || SkyConfig::from_file(&path).unwrap().apply_env_overrides().unwrap(),
    );

    assert_eq!(config.bind_address(), "127.0.0.1:3000");
    assert_eq!(
        config.constellations.cache_path,
        PathBuf::from("/srv/sky/figures.json")
    );
    assert_eq!(config.stars.vizier_url, SkyConfig::default().stars.vizier_url);
}

#[test]
fn test_invalid_port_env_is_configuration_error() {
    let result = with_scoped_env(&[("PORT", Some("99999"))], || {
        SkyConfig::default().apply_env_overrides()
    });
    assert!(matches!(result, Err(SkyError::Configuration(_))));
}

#[tokio::test]
async fn test_configured_engine_builds() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SkyConfig::default();
    config.constellations.cache_path = dir.path().join("figures.json");

    let engine = config.build_engine().unwrap();
    assert!(!engine.figure_cache().is_loaded());
}

use gmaps_lib::maps_config::{MapsConfig, DEFAULT_STATIC_ENDPOINT};

#[test]
fn test_maps_config_new() {
    let config = MapsConfig::new();
    assert_eq!(config.api_key(), None);
    assert!(config.legacy_sensor);
    assert_eq!(config.default_zoom, 8);
    assert_eq!(config.static_endpoint.as_str(), DEFAULT_STATIC_ENDPOINT);
    assert_eq!((config.static_width, config.static_height), (640, 480));
}

#[test]
fn test_maps_config_get_config() {
    let test_fname = "tests/data/test.env";

    let config = MapsConfig::get_config(Some(test_fname)).unwrap();

    assert_eq!(config.api_key(), Some("TESTKEY"));
    assert!(!config.legacy_sensor);
    assert_eq!(config.default_zoom, 10);
    assert_eq!(
        config.container_style.as_ref().map(|s| s.as_str()),
        Some("width: 100%; height: 400px")
    );
}

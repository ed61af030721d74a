use anyhow::Error;
use std::path::Path;
use tempfile::TempDir;

use gmaps_cli::gmaps_cli_opts::render_document;
use gmaps_lib::maps_config::MapsConfig;

#[tokio::test]
async fn test_render_document() -> Result<(), Error> {
    let config = MapsConfig::new();
    let page = render_document(&config, Path::new("tests/data/markers.yaml"), None, Some("KEY"))
        .await?;

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Harbour walk</title>"));
    assert!(page.contains("maps/api/js?key=KEY&amp;sensor=false"));
    assert!(page.contains(r#"<div id="harbour"></div>"#));
    assert!(page.contains("mapTypeId: google.maps.MapTypeId.TERRAIN"));
    assert!(page.contains(r#"gmap.addMarker(-33.8568, 151.2153, "Opera House");"#));
    assert!(page.contains(r#"gmap.addMarker(-33.8523, 151.2108, "");"#));
    assert!(page.contains("gmap.click(onMapClick);"));
    assert!(page.contains(r#"<img id="harbour_static""#));
    assert!(page.contains("size=400x300"));
    Ok(())
}

#[tokio::test]
async fn test_render_document_title_and_output() -> Result<(), Error> {
    let config = MapsConfig::new();
    let page = render_document(
        &config,
        Path::new("tests/data/markers.yaml"),
        Some("Override"),
        None,
    )
    .await?;
    assert!(page.contains("<title>Override</title>"));
    assert!(!page.contains("key="));

    let tempdir = TempDir::new()?;
    let output = tempdir.path().join("page.html");
    tokio::fs::write(&output, page.as_bytes()).await?;
    let written = tokio::fs::read_to_string(&output).await?;
    assert_eq!(written.as_str(), page.as_str());
    Ok(())
}

#[tokio::test]
async fn test_render_document_missing_file() {
    let config = MapsConfig::new();
    let result = render_document(&config, Path::new("tests/data/missing.yaml"), None, None).await;
    assert!(result.is_err());
}

#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_panics_doc)]

pub mod client_runtime;
pub mod errors;
pub mod google_map;
pub mod javascript_map;
pub mod map_definition;
pub mod map_script;
pub mod map_type;
pub mod maps_config;
pub mod maps_manager;
pub mod maps_templates;
pub mod marker;
pub mod static_map;

#[cfg(test)]
mod tests {
    use crate::{
        google_map::GoogleMap, javascript_map::JavascriptMap, map_type::MapType, marker::Marker,
    };

    #[test]
    fn test_builder_render() {
        let map = JavascriptMap::new()
            .with_id("map1")
            .with_zoom(8)
            .with_map_type(MapType::Roadmap)
            .with_marker(Marker::new(-34.397, 150.644));
        let body = map.render().unwrap();
        assert!(body.starts_with(r#"<div id="map1"></div>"#));
        assert_eq!(body.matches("gmap.addMarker(").count(), 1);
        assert!(body.contains(r#"gmap.addMarker(-34.397, 150.644, "");"#));
        assert!(!body.contains("fitToMarkers"));
    }
}

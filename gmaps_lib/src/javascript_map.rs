use log::debug;
use maplit::hashmap;
use stack_string::{format_sstr, StackString};
use url::Url;

use crate::{
    errors::MapsError as Error,
    google_map::{check_id, resolve_center, GoogleMap, MapCommon},
    map_script::{validate_callback, LatLng, MapScript, ScriptInstruction},
    map_type::MapType,
    maps_config::{MapsConfig, DEFAULT_JS_ENDPOINT},
    maps_templates::HBR,
    marker::Marker,
};

/// Interactive map, rendered as a container element followed by a script
/// that drives the client runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct JavascriptMap {
    common: MapCommon,
    map_type: MapType,
    center: Option<Marker>,
    fit_to_markers: bool,
    click_callback: Option<StackString>,
    api_key: Option<StackString>,
    api_endpoint: StackString,
    legacy_sensor: bool,
    container_style: Option<StackString>,
}

impl Default for JavascriptMap {
    fn default() -> Self {
        Self {
            common: MapCommon::default(),
            map_type: MapType::default(),
            center: None,
            fit_to_markers: false,
            click_callback: None,
            api_key: None,
            api_endpoint: DEFAULT_JS_ENDPOINT.into(),
            legacy_sensor: true,
            container_style: None,
        }
    }
}

impl JavascriptMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &MapsConfig) -> Self {
        let mut map = Self::new();
        map.api_key = config.api_key().map(Into::into);
        map.api_endpoint = config.js_endpoint.clone();
        map.legacy_sensor = config.legacy_sensor;
        map.container_style = config.container_style.clone();
        map.common.zoom = config.default_zoom;
        map
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.set_id(id);
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: i32) -> Self {
        self.set_zoom(zoom);
        self
    }

    #[must_use]
    pub fn with_map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.add_marker(marker);
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: Marker) -> Self {
        self.set_center(center);
        self
    }

    #[must_use]
    pub fn with_fit_to_markers(mut self) -> Self {
        self.fit_to_markers = true;
        self
    }

    /// # Errors
    /// Returns error if `map_type` is not one of the four supported values,
    /// the current type is left unchanged in that case.
    pub fn set_type(&mut self, map_type: &str) -> Result<(), Error> {
        self.map_type = map_type.parse()?;
        Ok(())
    }

    pub fn set_map_type(&mut self, map_type: MapType) {
        self.map_type = map_type;
    }

    #[must_use]
    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    #[must_use]
    pub fn is_type_valid(map_type: &str) -> bool {
        MapType::is_type_valid(map_type)
    }

    /// An explicit center and fitting to markers are exclusive, setting a
    /// center turns fitting off.
    pub fn set_center(&mut self, center: Marker) {
        self.center = Some(center);
        self.fit_to_markers = false;
    }

    pub fn clear_center(&mut self) {
        self.center = None;
    }

    #[must_use]
    pub fn explicit_center(&self) -> Option<&Marker> {
        self.center.as_ref()
    }

    #[must_use]
    pub fn center(&self) -> Option<&Marker> {
        resolve_center(self.center.as_ref(), &self.common.markers)
    }

    #[must_use]
    pub fn fit_to_markers(&self) -> bool {
        self.fit_to_markers
    }

    pub fn set_fit_to_markers(&mut self, value: bool) {
        self.fit_to_markers = value;
    }

    #[must_use]
    pub fn click_callback(&self) -> Option<&str> {
        self.click_callback.as_ref().map(AsRef::as_ref)
    }

    /// # Errors
    /// Returns error if `callback` is not a dotted javascript identifier
    pub fn set_click_callback(&mut self, callback: &str) -> Result<(), Error> {
        self.click_callback = Some(validate_callback(callback)?);
        Ok(())
    }

    pub fn clear_click_callback(&mut self) {
        self.click_callback = None;
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(AsRef::as_ref)
    }

    pub fn set_api_key(&mut self, api_key: Option<&str>) {
        self.api_key = api_key.map(Into::into);
    }

    pub fn set_legacy_sensor(&mut self, legacy_sensor: bool) {
        self.legacy_sensor = legacy_sensor;
    }

    pub fn set_container_style(&mut self, style: Option<&str>) {
        self.container_style = style.map(Into::into);
    }

    /// Structured form of the initialization script.
    #[must_use]
    pub fn script(&self) -> MapScript {
        let mut script = MapScript::new(self.id());
        script.push(ScriptInstruction::Initialize {
            zoom: self.zoom(),
            center: self.center().map_or_else(LatLng::default, LatLng::from),
            map_type: self.map_type,
        });
        for marker in self.markers() {
            script.push(ScriptInstruction::AddMarker {
                position: marker.into(),
                info_window: marker.info_window().map(Into::into),
            });
        }
        if self.fit_to_markers {
            script.push(ScriptInstruction::FitToMarkers);
        }
        if let Some(callback) = &self.click_callback {
            script.push(ScriptInstruction::RegisterClick {
                callback: callback.clone(),
            });
        }
        script
    }

    /// # Errors
    /// Returns error if template rendering fails
    pub fn render_container(&self) -> Result<StackString, Error> {
        let style = self.container_style.as_ref().map_or("", AsRef::as_ref);
        let params = hashmap! {
            "ID" => self.id(),
            "STYLE" => style,
        };
        Ok(HBR.render("MAP_CONTAINER", &params)?.into())
    }

    /// # Errors
    /// Returns error if template rendering fails
    pub fn render_javascript(&self) -> Result<StackString, Error> {
        let script = self.script().to_js();
        let params = hashmap! {
            "SCRIPT" => script.as_str(),
        };
        Ok(HBR.render("MAP_SCRIPT", &params)?.into())
    }

    /// Url of the provider's javascript library.
    /// # Errors
    /// Returns error if the configured endpoint is not a valid url
    pub fn google_map_library_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.api_endpoint)?;
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = &self.api_key {
            pairs.push(("key", key.as_str()));
        }
        if self.legacy_sensor {
            pairs.push(("sensor", if self.sensor() { "true" } else { "false" }));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// # Errors
    /// Returns error if the url is invalid or template rendering fails
    pub fn google_map_library(&self) -> Result<StackString, Error> {
        let url = self.google_map_library_url()?;
        let params = hashmap! {
            "SRC" => url.as_str(),
        };
        Ok(HBR.render("MAP_LIBRARY", &params)?.into())
    }
}

impl GoogleMap for JavascriptMap {
    fn common(&self) -> &MapCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MapCommon {
        &mut self.common
    }

    fn render(&self) -> Result<StackString, Error> {
        check_id(self)?;
        debug!(
            "render javascript map {} with {} markers",
            self.id(),
            self.markers().len()
        );
        let container = self.render_container()?;
        let javascript = self.render_javascript()?;
        Ok(format_sstr!("{container}{javascript}"))
    }
}

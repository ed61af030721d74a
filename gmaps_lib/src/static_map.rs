use log::debug;
use maplit::hashmap;
use stack_string::{format_sstr, StackString};
use url::Url;

use crate::{
    errors::MapsError as Error,
    google_map::{check_id, resolve_center, GoogleMap, MapCommon},
    map_script::js_number,
    map_type::MapType,
    maps_config::{MapsConfig, DEFAULT_STATIC_ENDPOINT},
    maps_templates::HBR,
    marker::Marker,
};

/// Map rendered as a single `<img>` pointing at the static maps api.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMap {
    common: MapCommon,
    map_type: MapType,
    center: Option<Marker>,
    width: u32,
    height: u32,
    api_key: Option<StackString>,
    api_endpoint: StackString,
    legacy_sensor: bool,
}

impl Default for StaticMap {
    fn default() -> Self {
        Self {
            common: MapCommon::default(),
            map_type: MapType::default(),
            center: None,
            width: 640,
            height: 480,
            api_key: None,
            api_endpoint: DEFAULT_STATIC_ENDPOINT.into(),
            legacy_sensor: true,
        }
    }
}

impl StaticMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &MapsConfig) -> Self {
        let mut map = Self::new();
        map.api_key = config.api_key().map(Into::into);
        map.api_endpoint = config.static_endpoint.clone();
        map.legacy_sensor = config.legacy_sensor;
        map.width = config.static_width;
        map.height = config.static_height;
        map.common.zoom = config.default_zoom;
        map
    }

    /// # Errors
    /// Returns error if `map_type` is not one of the four supported values
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

    pub fn set_center(&mut self, center: Marker) {
        self.center = Some(center);
    }

    pub fn clear_center(&mut self) {
        self.center = None;
    }

    #[must_use]
    pub fn center(&self) -> Option<&Marker> {
        resolve_center(self.center.as_ref(), &self.common.markers)
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
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

    /// With markers and no explicit center the provider fits the viewport
    /// itself, so the center parameter is only sent when it is known.
    /// # Errors
    /// Returns error if the configured endpoint is not a valid url
    pub fn image_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.api_endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            match &self.center {
                Some(center) => {
                    query.append_pair("center", &format_latlng(center));
                }
                None if !self.has_markers() => {
                    query.append_pair("center", "0,0");
                }
                None => {}
            }
            query.append_pair("zoom", &StackString::from_display(self.zoom()));
            query.append_pair("size", &format_sstr!("{}x{}", self.width, self.height));
            query.append_pair("maptype", self.map_type.to_static_param());
            for marker in self.markers() {
                query.append_pair("markers", &format_latlng(marker));
            }
            if self.legacy_sensor {
                query.append_pair("sensor", if self.sensor() { "true" } else { "false" });
            }
            if let Some(key) = &self.api_key {
                query.append_pair("key", key);
            }
        }
        Ok(url)
    }
}

fn format_latlng(marker: &Marker) -> StackString {
    format_sstr!("{},{}", js_number(marker.latitude), js_number(marker.longitude))
}

impl GoogleMap for StaticMap {
    fn common(&self) -> &MapCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MapCommon {
        &mut self.common
    }

    fn render(&self) -> Result<StackString, Error> {
        check_id(self)?;
        debug!(
            "render static map {} with {} markers",
            self.id(),
            self.markers().len()
        );
        let url = self.image_url()?;
        let width = StackString::from_display(self.width);
        let height = StackString::from_display(self.height);
        let params = hashmap! {
            "ID" => self.id(),
            "SRC" => url.as_str(),
            "WIDTH" => width.as_str(),
            "HEIGHT" => height.as_str(),
            "ALT" => "Map",
        };
        Ok(HBR.render("STATIC_MAP", &params)?.into())
    }
}

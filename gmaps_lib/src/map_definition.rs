use log::{debug, warn};
use serde::{Deserialize, Serialize};
use stack_string::StackString;
use std::{collections::HashMap, ffi::OsStr, path::Path};

use crate::{
    errors::MapsError as Error,
    google_map::{GoogleMap, MapKind},
    map_type::MapType,
    maps_manager::{MapHandle, MapsManager, MAP_JAVASCRIPT},
    marker::Marker,
};

fn default_kind() -> StackString {
    MAP_JAVASCRIPT.into()
}

fn default_title() -> StackString {
    "Maps".into()
}

/// Declarative description of one map, as found in a yaml or json document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub id: StackString,
    #[serde(default = "default_kind")]
    pub kind: StackString,
    #[serde(default)]
    pub zoom: Option<i32>,
    #[serde(default)]
    pub map_type: Option<MapType>,
    #[serde(default)]
    pub sensor: Option<bool>,
    #[serde(default)]
    pub center: Option<Marker>,
    #[serde(default)]
    pub fit_to_markers: bool,
    #[serde(default)]
    pub click_callback: Option<StackString>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(flatten, skip_serializing)]
    pub extra: HashMap<StackString, serde_json::Value>,
}

impl MapDefinition {
    /// Build the map through the manager so the shared configuration and
    /// every setter check applies.
    /// # Errors
    /// Returns error on an unsupported kind or an invalid callback
    pub fn build(&self, manager: &MapsManager) -> Result<MapKind, Error> {
        for key in self.extra.keys() {
            warn!("unknown map parameter for {}: {}", self.id, key);
        }
        let mut map = manager.create(&self.kind, &self.id)?;
        if let Some(zoom) = self.zoom {
            map.set_zoom(zoom);
        }
        if let Some(sensor) = self.sensor {
            map.set_sensor(sensor);
        }
        for marker in &self.markers {
            map.add_marker(marker.clone());
        }
        match &mut map {
            MapKind::Javascript(js_map) => {
                if let Some(map_type) = self.map_type {
                    js_map.set_map_type(map_type);
                }
                if self.fit_to_markers {
                    js_map.set_fit_to_markers(true);
                }
                if let Some(center) = &self.center {
                    if self.fit_to_markers {
                        warn!("map {} sets both center and fit_to_markers, using center", self.id);
                    }
                    js_map.set_center(center.clone());
                }
                if let Some(callback) = &self.click_callback {
                    js_map.set_click_callback(callback)?;
                }
                if self.width.is_some() || self.height.is_some() {
                    debug!("size is ignored for javascript map {}", self.id);
                }
            }
            MapKind::Static(static_map) => {
                if let Some(map_type) = self.map_type {
                    static_map.set_map_type(map_type);
                }
                if let Some(center) = &self.center {
                    static_map.set_center(center.clone());
                }
                let (width, height) = static_map.size();
                static_map.set_size(self.width.unwrap_or(width), self.height.unwrap_or(height));
                if self.fit_to_markers || self.click_callback.is_some() {
                    debug!("interactive options are ignored for static map {}", self.id);
                }
            }
        }
        Ok(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default = "default_title")]
    pub title: StackString,
    #[serde(default)]
    pub maps: Vec<MapDefinition>,
}

impl MapDocument {
    /// # Errors
    /// Returns error if the yaml is malformed
    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        serde_yaml_ng::from_str(contents).map_err(Into::into)
    }

    /// # Errors
    /// Returns error if the json is malformed
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        serde_json::from_str(contents).map_err(Into::into)
    }

    /// Pick the format from the file extension, yaml unless it ends in `.json`.
    /// # Errors
    /// Returns error if the document is malformed
    pub fn parse(path: &Path, contents: &str) -> Result<Self, Error> {
        match path.extension().and_then(OsStr::to_str) {
            Some("json") => Self::from_json(contents),
            _ => Self::from_yaml(contents),
        }
    }

    /// Create every map and register it with the manager, in document order.
    /// # Errors
    /// Returns error if any definition fails to build
    pub fn build(&self, manager: &mut MapsManager) -> Result<Vec<MapHandle>, Error> {
        let mut handles = Vec::with_capacity(self.maps.len());
        for definition in &self.maps {
            let map = definition.build(manager)?;
            handles.push(manager.add_map(map));
        }
        Ok(handles)
    }
}

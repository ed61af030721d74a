use log::debug;
use stack_string::StackString;
use std::collections::HashMap;

use crate::{
    map_script::{LatLng, MapScript, ScriptInstruction},
    map_type::MapType,
};

/// Browser side runtime the rendered scripts call into.
pub const CLIENT_RUNTIME_JS: &str = include_str!("../static/gmaps_runtime.js");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    #[must_use]
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub zoom: i32,
    pub center: LatLng,
    pub map_type: MapType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientMarker {
    pub position: LatLng,
    pub info_window: Option<StackString>,
}

/// What the registered callback receives after a click on the map background.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub callback: StackString,
    pub position: LatLng,
}

/// State held for one map on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapWrapper {
    id: StackString,
    options: Option<MapOptions>,
    markers: Vec<ClientMarker>,
    current_info_window: Option<usize>,
    click_marker: Option<LatLng>,
    click_callback: Option<StackString>,
    viewport: Option<LatLngBounds>,
}

impl MapWrapper {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn options(&self) -> Option<&MapOptions> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn markers(&self) -> &[ClientMarker] {
        &self.markers
    }

    #[must_use]
    pub fn current_info_window(&self) -> Option<usize> {
        self.current_info_window
    }

    #[must_use]
    pub fn click_marker(&self) -> Option<LatLng> {
        self.click_marker
    }

    #[must_use]
    pub fn viewport(&self) -> Option<&LatLngBounds> {
        self.viewport.as_ref()
    }

    pub fn initialize(&mut self, options: MapOptions) {
        self.options = Some(options);
    }

    /// Empty text means no info window and no click listener.
    pub fn add_marker(&mut self, position: LatLng, text: &str) {
        let info_window = if text.is_empty() {
            None
        } else {
            Some(text.into())
        };
        self.markers.push(ClientMarker {
            position,
            info_window,
        });
    }

    /// Bounding box over every marker, `None` when there are no markers.
    pub fn fit_to_markers(&mut self) -> Option<LatLngBounds> {
        let mut iter = self.markers.iter();
        let mut bounds = LatLngBounds::from_point(iter.next()?.position);
        for marker in iter {
            bounds.extend(marker.position);
        }
        self.viewport = Some(bounds);
        Some(bounds)
    }

    pub fn click(&mut self, callback: &str) {
        self.click_callback = Some(callback.into());
    }

    /// Click on the marker at `index`, opening its info window and closing
    /// the one that was open. Returns the content now shown.
    pub fn click_on_marker(&mut self, index: usize) -> Option<&str> {
        let marker = self.markers.get(index)?;
        let content = marker.info_window.as_ref()?;
        self.current_info_window = Some(index);
        Some(content.as_str())
    }

    pub fn close_info_window(&mut self) {
        self.current_info_window = None;
    }

    /// Click on the map background, replaces the ad-hoc click marker.
    pub fn click_on_map(&mut self, position: LatLng) -> Option<ClickEvent> {
        let callback = self.click_callback.clone()?;
        self.click_marker = Some(position);
        Some(ClickEvent { callback, position })
    }

    pub fn apply(&mut self, instruction: &ScriptInstruction) {
        match instruction {
            ScriptInstruction::Initialize {
                zoom,
                center,
                map_type,
            } => self.initialize(MapOptions {
                zoom: *zoom,
                center: *center,
                map_type: *map_type,
            }),
            ScriptInstruction::AddMarker {
                position,
                info_window,
            } => self.add_marker(*position, info_window.as_ref().map_or("", AsRef::as_ref)),
            ScriptInstruction::FitToMarkers => {
                self.fit_to_markers();
            }
            ScriptInstruction::RegisterClick { callback } => self.click(callback),
        }
    }
}

/// Page level registry of map wrappers keyed by map id.
#[derive(Debug, Clone, Default)]
pub struct PageController {
    wrappers: HashMap<StackString, MapWrapper>,
}

impl PageController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrapper for `id`, created on first access.
    pub fn map(&mut self, id: &str) -> &mut MapWrapper {
        self.wrappers
            .entry(id.into())
            .or_insert_with(|| MapWrapper::new(id))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MapWrapper> {
        self.wrappers.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }

    pub fn execute(&mut self, script: &MapScript) {
        debug!(
            "execute {} instructions for {}",
            script.instructions.len(),
            script.map_id
        );
        let wrapper = self.map(&script.map_id);
        for instruction in &script.instructions {
            wrapper.apply(instruction);
        }
    }
}

use stack_string::StackString;

use crate::{
    errors::MapsError as Error, javascript_map::JavascriptMap, marker::Marker,
    static_map::StaticMap,
};

pub const DEFAULT_ZOOM: i32 = 8;

/// State shared by every map variant.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCommon {
    pub id: StackString,
    pub markers: Vec<Marker>,
    pub sensor: bool,
    pub zoom: i32,
}

impl Default for MapCommon {
    fn default() -> Self {
        Self {
            id: "".into(),
            markers: Vec::new(),
            sensor: false,
            zoom: DEFAULT_ZOOM,
        }
    }
}

pub trait GoogleMap {
    fn common(&self) -> &MapCommon;

    fn common_mut(&mut self) -> &mut MapCommon;

    /// # Errors
    /// Returns error if the id is unset or template rendering fails
    fn render(&self) -> Result<StackString, Error>;

    fn id(&self) -> &str {
        &self.common().id
    }

    fn set_id(&mut self, id: &str) {
        self.common_mut().id = id.into();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.common_mut().markers.push(marker);
    }

    fn has_markers(&self) -> bool {
        !self.common().markers.is_empty()
    }

    /// Markers in insertion order.
    fn markers(&self) -> &[Marker] {
        &self.common().markers
    }

    fn sensor(&self) -> bool {
        self.common().sensor
    }

    fn set_sensor(&mut self, sensor: bool) {
        self.common_mut().sensor = sensor;
    }

    fn zoom(&self) -> i32 {
        self.common().zoom
    }

    fn set_zoom(&mut self, zoom: i32) {
        self.common_mut().zoom = zoom;
    }
}

/// Explicit center first, then the first marker added, otherwise none.
#[must_use]
pub fn resolve_center<'a>(explicit: Option<&'a Marker>, markers: &'a [Marker]) -> Option<&'a Marker> {
    explicit.or_else(|| markers.first())
}

pub(crate) fn check_id(map: &impl GoogleMap) -> Result<(), Error> {
    if map.id().is_empty() {
        Err(Error::MissingMapId)
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapKind {
    Javascript(JavascriptMap),
    Static(StaticMap),
}

impl MapKind {
    #[must_use]
    pub fn as_javascript(&self) -> Option<&JavascriptMap> {
        match self {
            Self::Javascript(map) => Some(map),
            Self::Static(_) => None,
        }
    }

    pub fn as_javascript_mut(&mut self) -> Option<&mut JavascriptMap> {
        match self {
            Self::Javascript(map) => Some(map),
            Self::Static(_) => None,
        }
    }

    #[must_use]
    pub fn as_static(&self) -> Option<&StaticMap> {
        match self {
            Self::Static(map) => Some(map),
            Self::Javascript(_) => None,
        }
    }

    pub fn as_static_mut(&mut self) -> Option<&mut StaticMap> {
        match self {
            Self::Static(map) => Some(map),
            Self::Javascript(_) => None,
        }
    }
}

impl GoogleMap for MapKind {
    fn common(&self) -> &MapCommon {
        match self {
            Self::Javascript(map) => map.common(),
            Self::Static(map) => map.common(),
        }
    }

    fn common_mut(&mut self) -> &mut MapCommon {
        match self {
            Self::Javascript(map) => map.common_mut(),
            Self::Static(map) => map.common_mut(),
        }
    }

    fn render(&self) -> Result<StackString, Error> {
        match self {
            Self::Javascript(map) => map.render(),
            Self::Static(map) => map.render(),
        }
    }
}

impl From<JavascriptMap> for MapKind {
    fn from(map: JavascriptMap) -> Self {
        Self::Javascript(map)
    }
}

impl From<StaticMap> for MapKind {
    fn from(map: StaticMap) -> Self {
        Self::Static(map)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        google_map::{resolve_center, GoogleMap, MapKind},
        javascript_map::JavascriptMap,
        marker::Marker,
    };

    #[test]
    fn test_resolve_center() {
        let a = Marker::new(1.0, 1.0);
        let b = Marker::new(2.0, 2.0);
        let c = Marker::new(3.0, 3.0);
        let markers = vec![a.clone(), b];
        assert_eq!(resolve_center(None, &[]), None);
        assert_eq!(resolve_center(None, &markers), Some(&a));
        assert_eq!(resolve_center(Some(&c), &markers), Some(&c));
    }

    #[test]
    fn test_map_kind_dispatch() {
        let mut map: MapKind = JavascriptMap::new().into();
        map.set_id("map1");
        map.set_zoom(3);
        map.add_marker(Marker::new(0.5, 0.5));
        assert_eq!(map.id(), "map1");
        assert_eq!(map.zoom(), 3);
        assert!(map.has_markers());
        assert!(map.as_javascript().is_some());
        assert!(map.as_static().is_none());
    }
}

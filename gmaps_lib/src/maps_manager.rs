use log::{debug, warn};
use maplit::hashmap;
use stack_string::StackString;
use std::{fmt, str::FromStr};

use crate::{
    client_runtime::CLIENT_RUNTIME_JS,
    errors::MapsError as Error,
    google_map::{GoogleMap, MapKind},
    javascript_map::JavascriptMap,
    maps_config::MapsConfig,
    maps_templates::HBR,
    static_map::StaticMap,
};

pub const MAP_JAVASCRIPT: &str = "map_javascript";
pub const MAP_STATIC: &str = "map_static";

/// Factory discriminator for `MapsManager::create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapVariant {
    Javascript,
    Static,
}

impl MapVariant {
    #[must_use]
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Javascript => MAP_JAVASCRIPT,
            Self::Static => MAP_STATIC,
        }
    }
}

impl fmt::Display for MapVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for MapVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MAP_JAVASCRIPT => Ok(Self::Javascript),
            MAP_STATIC => Ok(Self::Static),
            _ => Err(Error::UnsupportedMapType(s.into())),
        }
    }
}

/// Identity of a map registered with a `MapsManager`, assigned once on
/// registration and never reused by that manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(usize);

/// Creates maps with the shared configuration applied and owns the maps
/// that belong to the current page.
#[derive(Debug, Default)]
pub struct MapsManager {
    config: MapsConfig,
    key: Option<StackString>,
    maps: Vec<(MapHandle, MapKind)>,
    next_handle: usize,
}

impl MapsManager {
    #[must_use]
    pub fn new(config: MapsConfig) -> Self {
        let key = config.api_key().map(Into::into);
        Self {
            config,
            key,
            maps: Vec::new(),
            next_handle: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_ref().map(AsRef::as_ref)
    }

    pub fn set_key(&mut self, key: &str) {
        self.key = Some(key.into());
    }

    #[must_use]
    pub fn has_maps(&self) -> bool {
        !self.maps.is_empty()
    }

    #[must_use]
    pub fn has_map(&self, handle: MapHandle) -> bool {
        self.maps.iter().any(|(h, _)| *h == handle)
    }

    pub fn add_map(&mut self, map: impl Into<MapKind>) -> MapHandle {
        let map = map.into();
        let handle = MapHandle(self.next_handle);
        self.next_handle += 1;
        debug!("add map {} as {:?}", map.id(), handle);
        self.maps.push((handle, map));
        handle
    }

    /// Returns the removed map, or `None` if `handle` is not registered.
    pub fn remove_map(&mut self, handle: MapHandle) -> Option<MapKind> {
        let index = self.maps.iter().position(|(h, _)| *h == handle)?;
        let (_, map) = self.maps.remove(index);
        debug!("remove map {}", map.id());
        Some(map)
    }

    /// Replace every registered map, returning the new handles in order.
    pub fn set_maps(&mut self, maps: Vec<MapKind>) -> Vec<MapHandle> {
        self.maps.clear();
        maps.into_iter().map(|map| self.add_map(map)).collect()
    }

    /// Registered maps in insertion order.
    pub fn maps(&self) -> impl Iterator<Item = &MapKind> {
        self.maps.iter().map(|(_, map)| map)
    }

    #[must_use]
    pub fn get(&self, handle: MapHandle) -> Option<&MapKind> {
        self.maps
            .iter()
            .find_map(|(h, map)| if *h == handle { Some(map) } else { None })
    }

    pub fn get_mut(&mut self, handle: MapHandle) -> Option<&mut MapKind> {
        self.maps
            .iter_mut()
            .find_map(|(h, map)| if *h == handle { Some(map) } else { None })
    }

    /// First registered map with a matching id.
    #[must_use]
    pub fn get_map_by_id(&self, id: &str) -> Option<&MapKind> {
        let index = self.position_by_id(id)?;
        Some(&self.maps[index].1)
    }

    pub fn get_map_by_id_mut(&mut self, id: &str) -> Option<&mut MapKind> {
        let index = self.position_by_id(id)?;
        Some(&mut self.maps[index].1)
    }

    fn position_by_id(&self, id: &str) -> Option<usize> {
        let mut matches = self
            .maps
            .iter()
            .enumerate()
            .filter(|(_, (_, m))| m.id() == id)
            .map(|(index, _)| index);
        let first = matches.next()?;
        if matches.next().is_some() {
            warn!("duplicate map id {}, using first match", id);
        }
        Some(first)
    }

    /// # Errors
    /// Returns error if `variant` is not a supported map type
    pub fn create(&self, variant: &str, id: &str) -> Result<MapKind, Error> {
        let variant: MapVariant = variant.parse()?;
        debug!("create {} {}", variant, id);
        let map = match variant {
            MapVariant::Javascript => {
                let mut map = JavascriptMap::from_config(&self.config);
                map.set_api_key(self.key());
                map.set_id(id);
                MapKind::Javascript(map)
            }
            MapVariant::Static => {
                let mut map = StaticMap::from_config(&self.config);
                map.set_api_key(self.key());
                map.set_id(id);
                MapKind::Static(map)
            }
        };
        Ok(map)
    }

    /// # Errors
    /// Returns error if `variant` is not a supported map type
    pub fn create_and_add(&mut self, variant: &str, id: &str) -> Result<MapHandle, Error> {
        let map = self.create(variant, id)?;
        Ok(self.add_map(map))
    }

    /// Script tag loading the provider library, shared by every javascript
    /// map on the page. The sensor flag is set if any registered map sets it.
    /// # Errors
    /// Returns error if the endpoint is invalid or rendering fails
    pub fn render_library(&self) -> Result<StackString, Error> {
        let sensor = self.maps().any(|m| m.sensor());
        self.library_tag(sensor)
    }

    /// Provider library tag for the configured key and an explicit sensor flag.
    /// # Errors
    /// Returns error if the endpoint is invalid or rendering fails
    pub fn library_tag(&self, sensor: bool) -> Result<StackString, Error> {
        let mut map = JavascriptMap::from_config(&self.config);
        map.set_api_key(self.key());
        map.set_sensor(sensor);
        map.google_map_library()
    }

    /// # Errors
    /// Returns error if any map fails to render
    pub fn render_maps(&self) -> Result<StackString, Error> {
        let bodies = self
            .maps()
            .map(|m| m.render())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bodies.join("\n").into())
    }

    /// Full html document with the library, the client runtime and every map.
    /// # Errors
    /// Returns error if any map fails to render
    pub fn render_page(&self, title: &str) -> Result<StackString, Error> {
        let library = self.render_library()?;
        let body = self.render_maps()?;
        let params = hashmap! {
            "TITLE" => title,
            "MAPS_LIBRARY" => library.as_str(),
            "MAPS_RUNTIME" => CLIENT_RUNTIME_JS,
            "MAPS_BODY" => body.as_str(),
        };
        Ok(HBR.render("MAP_PAGE", &params)?.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::MapsError,
        google_map::{GoogleMap, MapKind},
        maps_config::MapsConfig,
        maps_manager::{MapVariant, MapsManager},
        marker::Marker,
    };

    #[test]
    fn test_map_variant() {
        assert_eq!(
            "map_javascript".parse::<MapVariant>().unwrap(),
            MapVariant::Javascript
        );
        assert_eq!("map_static".parse::<MapVariant>().unwrap(), MapVariant::Static);
        assert!(matches!(
            "bogus".parse::<MapVariant>(),
            Err(MapsError::UnsupportedMapType(_))
        ));
    }

    #[test]
    fn test_identity_not_id() {
        let mut manager = MapsManager::new(MapsConfig::new());
        let a = manager.add_map(manager.create("map_javascript", "same").unwrap());
        let b = manager.add_map(manager.create("map_javascript", "same").unwrap());
        assert_ne!(a, b);
        assert!(manager.has_map(a));
        assert!(manager.remove_map(b).is_some());
        assert!(manager.remove_map(b).is_none());
        assert!(!manager.has_map(b));
        assert!(manager.has_map(a));

        let c = manager.create_and_add("map_static", "same").unwrap();
        assert_ne!(c, b);
        assert!(manager.remove_map(a).is_some());
        assert!(manager.get_map_by_id("same").unwrap().as_static().is_some());
    }

    #[test]
    fn test_lookup_while_configuring() {
        let mut manager = MapsManager::new(MapsConfig::new());
        let a = manager.create_and_add("map_javascript", "a").unwrap();
        manager.create_and_add("map_static", "b").unwrap();

        manager.get_mut(a).unwrap().add_marker(Marker::new(1.0, 2.0));
        manager.get_map_by_id_mut("b").unwrap().set_zoom(3);
        manager.get_map_by_id_mut("a").unwrap().set_sensor(true);

        assert_eq!(manager.get(a).unwrap().markers().len(), 1);
        assert_eq!(manager.get_map_by_id("b").unwrap().zoom(), 3);
        assert!(manager.get_map_by_id("c").is_none());
        assert!(manager.render_library().unwrap().contains("sensor=true"));
        assert!(manager.library_tag(false).unwrap().contains("sensor=false"));
    }

    #[test]
    fn test_set_maps() {
        let mut manager = MapsManager::new(MapsConfig::new());
        let old = manager.create_and_add("map_javascript", "old").unwrap();
        let first = manager.create("map_javascript", "x").unwrap();
        let second = manager.create("map_static", "y").unwrap();
        let handles = manager.set_maps(vec![first, second]);
        assert_eq!(handles.len(), 2);
        assert!(!manager.has_map(old));
        assert!(!handles.contains(&old));
        let ids: Vec<_> = manager.maps().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_create_applies_key() {
        let mut manager = MapsManager::new(MapsConfig::new());
        assert_eq!(manager.key(), None);
        manager.set_key("SECRET");
        match manager.create("map_javascript", "m1").unwrap() {
            MapKind::Javascript(map) => {
                assert_eq!(map.api_key(), Some("SECRET"));
                assert_eq!(map.id(), "m1");
            }
            MapKind::Static(_) => panic!("expected javascript map"),
        }
    }
}

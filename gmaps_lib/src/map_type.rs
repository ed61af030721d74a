use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use stack_string::StackString;
use std::{collections::HashMap, convert::TryFrom, fmt, str::FromStr};

use crate::errors::MapsError as Error;

static MAP_TYPE_MAP: Lazy<HashMap<&'static str, MapType>> = Lazy::new(init_map_type_map);

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "StackString", try_from = "StackString")]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<MapType> for StackString {
    fn from(item: MapType) -> StackString {
        item.to_str().into()
    }
}

impl MapType {
    pub const ALL: [Self; 4] = [Self::Roadmap, Self::Satellite, Self::Hybrid, Self::Terrain];

    #[must_use]
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Roadmap => "ROADMAP",
            Self::Satellite => "SATELLITE",
            Self::Hybrid => "HYBRID",
            Self::Terrain => "TERRAIN",
        }
    }

    #[must_use]
    pub fn to_label(self) -> &'static str {
        match self {
            Self::Roadmap => "Road Map",
            Self::Satellite => "Satellite",
            Self::Hybrid => "Hybrid",
            Self::Terrain => "Terrain",
        }
    }

    /// Lower case form used by the static maps api.
    #[must_use]
    pub fn to_static_param(self) -> &'static str {
        match self {
            Self::Roadmap => "roadmap",
            Self::Satellite => "satellite",
            Self::Hybrid => "hybrid",
            Self::Terrain => "terrain",
        }
    }

    #[must_use]
    pub fn is_type_valid(item: &str) -> bool {
        MAP_TYPE_MAP.contains_key(item)
    }
}

impl FromStr for MapType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MAP_TYPE_MAP
            .get(s)
            .copied()
            .ok_or_else(|| Error::InvalidMapType(s.into()))
    }
}

impl TryFrom<&str> for MapType {
    type Error = Error;
    fn try_from(item: &str) -> Result<Self, Self::Error> {
        item.parse()
    }
}

impl TryFrom<StackString> for MapType {
    type Error = Error;
    fn try_from(item: StackString) -> Result<Self, Self::Error> {
        item.as_str().parse()
    }
}

fn init_map_type_map() -> HashMap<&'static str, MapType> {
    MapType::ALL.iter().map(|t| (t.to_str(), *t)).collect()
}

/// Ordered `(value, label)` pairs for a type picker.
#[must_use]
pub fn get_map_type_choices() -> Vec<(&'static str, &'static str)> {
    MapType::ALL
        .iter()
        .map(|t| (t.to_str(), t.to_label()))
        .collect()
}

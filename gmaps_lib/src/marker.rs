use serde::{Deserialize, Serialize};
use stack_string::StackString;
use std::collections::HashMap;

pub const INFO_WINDOW_KEY: &str = "infowindow";

/// A single point of interest, coordinates are in degrees and are passed
/// through to the rendered output without range checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub metadata: HashMap<StackString, StackString>,
}

impl Marker {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_info_window(mut self, content: &str) -> Self {
        self.set_info_window(content);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = latitude;
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = longitude;
    }

    #[must_use]
    pub fn metadata(&self) -> &HashMap<StackString, StackString> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: HashMap<StackString, StackString>) {
        self.metadata = metadata;
    }

    /// Html shown in a popup when the marker is clicked.
    #[must_use]
    pub fn info_window(&self) -> Option<&str> {
        self.metadata.get(INFO_WINDOW_KEY).map(AsRef::as_ref)
    }

    pub fn set_info_window(&mut self, content: &str) {
        self.metadata.insert(INFO_WINDOW_KEY.into(), content.into());
    }
}

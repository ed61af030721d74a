use log::debug;
use serde::Deserialize;
use stack_string::StackString;
use std::{ops::Deref, path::Path, sync::Arc};

use crate::errors::MapsError as Error;

pub const DEFAULT_JS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/js";
pub const DEFAULT_STATIC_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const ENV_PREFIX: &str = "GMAPS_";

/// `MapsConfigInner` holds configuration which can be set either through
/// `GMAPS_` prefixed environment variables or a config.env file, see the
/// dotenvy crate for more information about the config file format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapsConfigInner {
    #[serde(default)]
    pub api_key: StackString,
    #[serde(default = "default_js_endpoint")]
    pub js_endpoint: StackString,
    #[serde(default = "default_static_endpoint")]
    pub static_endpoint: StackString,
    #[serde(default = "default_legacy_sensor")]
    pub legacy_sensor: bool,
    #[serde(default = "default_zoom")]
    pub default_zoom: i32,
    #[serde(default = "default_static_width")]
    pub static_width: u32,
    #[serde(default = "default_static_height")]
    pub static_height: u32,
    #[serde(default)]
    pub container_style: Option<StackString>,
}

fn default_js_endpoint() -> StackString {
    DEFAULT_JS_ENDPOINT.into()
}

fn default_static_endpoint() -> StackString {
    DEFAULT_STATIC_ENDPOINT.into()
}

fn default_legacy_sensor() -> bool {
    true
}

fn default_zoom() -> i32 {
    8
}

fn default_static_width() -> u32 {
    640
}

fn default_static_height() -> u32 {
    480
}

impl Default for MapsConfigInner {
    fn default() -> Self {
        Self {
            api_key: "".into(),
            js_endpoint: default_js_endpoint(),
            static_endpoint: default_static_endpoint(),
            legacy_sensor: default_legacy_sensor(),
            default_zoom: default_zoom(),
            static_width: default_static_width(),
            static_height: default_static_height(),
            container_style: None,
        }
    }
}

impl MapsConfigInner {
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(self.api_key.as_str())
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct MapsConfig(Arc<MapsConfigInner>);

impl MapsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_inner(inner: MapsConfigInner) -> Self {
        Self(Arc::new(inner))
    }

    /// Build a config from explicit key/value pairs instead of the process
    /// environment, keys still carry the `GMAPS_` prefix.
    /// # Errors
    /// Returns error if a value fails to parse
    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let conf: MapsConfigInner = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        Ok(Self::from_inner(conf))
    }

    /// Pull configuration from a file if it exists,
    /// first look for the file passed in,
    /// then try `${CONFIG_DIR}/gmaps_rust/config.env`,
    /// then a config.env file in the current directory.
    /// # Errors
    /// Returns error if an environment value fails to parse
    pub fn get_config(fname: Option<&str>) -> Result<Self, Error> {
        let default_fname =
            dirs::config_dir().map(|d| d.join("gmaps_rust").join("config.env"));

        let env_file = match fname.map(Path::new) {
            Some(fname) if fname.exists() => Some(fname.to_path_buf()),
            _ => default_fname,
        };

        dotenvy::dotenv().ok();

        match env_file {
            Some(env_file) if env_file.exists() => {
                debug!("loading config from {}", env_file.display());
                dotenvy::from_path(&env_file).ok();
            }
            _ => {
                if Path::new("config.env").exists() {
                    dotenvy::from_filename("config.env").ok();
                }
            }
        }

        let conf: MapsConfigInner = envy::prefixed(ENV_PREFIX).from_env()?;
        Ok(Self::from_inner(conf))
    }
}

impl Deref for MapsConfig {
    type Target = MapsConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::maps_config::{MapsConfig, DEFAULT_JS_ENDPOINT};

    #[test]
    fn test_maps_config_from_vars() {
        let config = MapsConfig::from_vars(vec![
            ("GMAPS_API_KEY".to_string(), "abc123".to_string()),
            ("GMAPS_LEGACY_SENSOR".to_string(), "false".to_string()),
            ("GMAPS_STATIC_WIDTH".to_string(), "320".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ])
        .unwrap();
        assert_eq!(config.api_key(), Some("abc123"));
        assert!(!config.legacy_sensor);
        assert_eq!(config.static_width, 320);
        assert_eq!(config.static_height, 480);
        assert_eq!(config.js_endpoint.as_str(), DEFAULT_JS_ENDPOINT);
    }

    #[test]
    fn test_maps_config_bad_value() {
        let result = MapsConfig::from_vars(vec![(
            "GMAPS_DEFAULT_ZOOM".to_string(),
            "twelve".to_string(),
        )]);
        assert!(result.is_err());
    }
}

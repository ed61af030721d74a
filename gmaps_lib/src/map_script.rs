use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use stack_string::{format_sstr, StackString};
use std::fmt;

use crate::{errors::MapsError as Error, map_type::MapType, marker::Marker};

static CALLBACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("Failed to compile callback regex")
});

/// Name of the page level controller accessor defined by the client runtime.
pub const RUNTIME_CONTROLLER: &str = "GMapsRuntime.controller()";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&Marker> for LatLng {
    fn from(marker: &Marker) -> Self {
        Self::new(marker.latitude, marker.longitude)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{lat: {}, lng: {}}}", js_number(self.lat), js_number(self.lng))
    }
}

/// One call against the client side map wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptInstruction {
    Initialize {
        zoom: i32,
        center: LatLng,
        map_type: MapType,
    },
    AddMarker {
        position: LatLng,
        info_window: Option<StackString>,
    },
    FitToMarkers,
    RegisterClick {
        callback: StackString,
    },
}

impl ScriptInstruction {
    /// Serialize a single instruction as a javascript statement against `target`.
    #[must_use]
    pub fn to_js(&self, target: &str) -> StackString {
        match self {
            Self::Initialize {
                zoom,
                center,
                map_type,
            } => format_sstr!(
                "{target}.initialize({{zoom: {zoom}, center: {center}, mapTypeId: \
                 google.maps.MapTypeId.{map_type}}});"
            ),
            Self::AddMarker {
                position,
                info_window,
            } => {
                let content = js_string(info_window.as_ref().map_or("", AsRef::as_ref));
                format_sstr!(
                    "{target}.addMarker({}, {}, {content});",
                    js_number(position.lat),
                    js_number(position.lng),
                )
            }
            Self::FitToMarkers => format_sstr!("{target}.fitToMarkers();"),
            Self::RegisterClick { callback } => format_sstr!("{target}.click({callback});"),
        }
    }
}

/// Ordered list of typed instructions for one map, serialized independently
/// of the html container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapScript {
    pub map_id: StackString,
    pub instructions: Vec<ScriptInstruction>,
}

impl MapScript {
    #[must_use]
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.into(),
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instruction: ScriptInstruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    /// Positional marker indices that get an info window click listener.
    #[must_use]
    pub fn info_window_indices(&self) -> Vec<usize> {
        self.instructions
            .iter()
            .filter_map(|inst| match inst {
                ScriptInstruction::AddMarker { info_window, .. } => Some(info_window),
                _ => None,
            })
            .enumerate()
            .filter_map(|(index, info_window)| match info_window {
                Some(content) if !content.is_empty() => Some(index),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&ScriptInstruction) -> bool) -> usize {
        self.instructions.iter().filter(|inst| predicate(inst)).count()
    }

    /// Body of the `<script>` block, wrapped in a closure so the wrapper
    /// variable does not leak into the page scope.
    #[must_use]
    pub fn to_js(&self) -> StackString {
        let target = "gmap";
        let body = self
            .instructions
            .iter()
            .map(|inst| format_sstr!("    {}", inst.to_js(target)))
            .join("\n");
        format_sstr!(
            "(function () {{\n    var {target} = {RUNTIME_CONTROLLER}.map({});\n{body}\n}}());",
            js_string(&self.map_id)
        )
    }
}

/// Format a float as a javascript numeric literal.
#[must_use]
pub fn js_number(value: f64) -> StackString {
    if value.is_nan() {
        "NaN".into()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".into()
        } else {
            "-Infinity".into()
        }
    } else {
        StackString::from_display(value)
    }
}

/// Quote a string as a javascript literal that is safe to embed inside a
/// `<script>` element.
#[must_use]
pub fn js_string(value: &str) -> StackString {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| r#""""#.to_string());
    let mut output = String::with_capacity(quoted.len());
    for c in quoted.chars() {
        match c {
            '<' => output.push_str("\\u003c"),
            '>' => output.push_str("\\u003e"),
            '&' => output.push_str("\\u0026"),
            '\u{2028}' => output.push_str("\\u2028"),
            '\u{2029}' => output.push_str("\\u2029"),
            c => output.push(c),
        }
    }
    output.into()
}

/// Check that a click callback is a plain (optionally dotted) javascript
/// identifier, e.g. `onMapClick` or `app.maps.onClick`.
/// # Errors
/// Return error if the reference contains anything else
pub fn validate_callback(callback: &str) -> Result<StackString, Error> {
    if CALLBACK_REGEX.is_match(callback) {
        Ok(callback.into())
    } else {
        Err(Error::InvalidCallback(callback.into()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        map_script::{
            js_number, js_string, validate_callback, LatLng, MapScript, ScriptInstruction,
        },
        map_type::MapType,
    };

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(-34.397).as_str(), "-34.397");
        assert_eq!(js_number(8.0).as_str(), "8");
        assert_eq!(js_number(f64::INFINITY).as_str(), "Infinity");
        assert_eq!(js_number(f64::NEG_INFINITY).as_str(), "-Infinity");
        assert_eq!(js_number(f64::NAN).as_str(), "NaN");
    }

    #[test]
    fn test_js_string_escapes_script_breakout() {
        let escaped = js_string("</script><script>alert('x')</script>");
        assert!(!escaped.contains("</script>"));
        assert!(!escaped.contains('<'));
        assert_eq!(
            escaped.as_str(),
            r#""\u003c/script\u003e\u003cscript\u003ealert('x')\u003c/script\u003e""#
        );
        assert_eq!(js_string("a\"b\n").as_str(), r#""a\"b\n""#);
        assert_eq!(js_string("\u{2028}").as_str(), r#""\u2028""#);
    }

    #[test]
    fn test_validate_callback() {
        assert!(validate_callback("onMapClick").is_ok());
        assert!(validate_callback("app.maps.$onClick_2").is_ok());
        assert!(validate_callback("").is_err());
        assert!(validate_callback("alert(1)").is_err());
        assert!(validate_callback("a..b").is_err());
        assert!(validate_callback("1abc").is_err());
        assert!(validate_callback("x;alert(1)").is_err());
    }

    #[test]
    fn test_instruction_to_js() {
        let inst = ScriptInstruction::Initialize {
            zoom: 8,
            center: LatLng::new(-34.397, 150.644),
            map_type: MapType::Roadmap,
        };
        assert_eq!(
            inst.to_js("gmap").as_str(),
            "gmap.initialize({zoom: 8, center: {lat: -34.397, lng: 150.644}, mapTypeId: \
             google.maps.MapTypeId.ROADMAP});"
        );
        let inst = ScriptInstruction::AddMarker {
            position: LatLng::new(1.5, -2.0),
            info_window: None,
        };
        assert_eq!(inst.to_js("gmap").as_str(), r#"gmap.addMarker(1.5, -2, "");"#);
        let inst = ScriptInstruction::RegisterClick {
            callback: "onMapClick".into(),
        };
        assert_eq!(inst.to_js("gmap").as_str(), "gmap.click(onMapClick);");
        assert_eq!(
            ScriptInstruction::FitToMarkers.to_js("gmap").as_str(),
            "gmap.fitToMarkers();"
        );
    }

    #[test]
    fn test_info_window_indices() {
        let mut script = MapScript::new("m");
        script
            .push(ScriptInstruction::Initialize {
                zoom: 1,
                center: LatLng::default(),
                map_type: MapType::Roadmap,
            })
            .push(ScriptInstruction::AddMarker {
                position: LatLng::default(),
                info_window: None,
            })
            .push(ScriptInstruction::AddMarker {
                position: LatLng::default(),
                info_window: Some("".into()),
            })
            .push(ScriptInstruction::AddMarker {
                position: LatLng::default(),
                info_window: Some("<p>x</p>".into()),
            });
        assert_eq!(script.info_window_indices(), vec![2]);
    }
}

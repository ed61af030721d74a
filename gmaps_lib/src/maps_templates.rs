use handlebars::Handlebars;
use once_cell::sync::Lazy;

use crate::errors::MapsError as Error;

/// Escape for text and quoted attribute values, urls keep their `=`.
#[must_use]
pub fn escape_html(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '&' => output.push_str("&amp;"),
            '\'' => output.push_str("&#x27;"),
            c => output.push(c),
        }
    }
    output
}

pub(crate) fn get_templates() -> Result<Handlebars<'static>, Error> {
    let mut h = Handlebars::new();
    h.register_escape_fn(escape_html);
    h.register_template_string(
        "MAP_CONTAINER",
        include_str!("../templates/MAP_CONTAINER.html.hbr"),
    )?;
    h.register_template_string(
        "MAP_SCRIPT",
        include_str!("../templates/MAP_SCRIPT.html.hbr"),
    )?;
    h.register_template_string(
        "MAP_LIBRARY",
        include_str!("../templates/MAP_LIBRARY.html.hbr"),
    )?;
    h.register_template_string(
        "STATIC_MAP",
        include_str!("../templates/STATIC_MAP.html.hbr"),
    )?;
    h.register_template_string("MAP_PAGE", include_str!("../templates/MAP_PAGE.html.hbr"))?;

    Ok(h)
}

pub static HBR: Lazy<Handlebars<'static>> =
    Lazy::new(|| get_templates().expect("Failed to parse templates"));

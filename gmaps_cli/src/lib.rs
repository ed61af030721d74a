#![allow(clippy::module_name_repetitions)]

pub mod gmaps_cli_opts;

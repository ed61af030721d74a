use envy::Error as EnvyError;
use handlebars::{RenderError as HandlebarsRenderError, TemplateError as HandlebarsTemplateError};
use serde_json::Error as SerdeJsonError;
use serde_yaml_ng::Error as YamlError;
use stack_string::StackString;
use std::fmt::Debug;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum MapsError {
    #[error("{0} is not a valid Javascript Map Type.")]
    InvalidMapType(StackString),
    #[error("Google Map's type: {0} is not supported")]
    UnsupportedMapType(StackString),
    #[error("{0} is not a valid javascript callback reference")]
    InvalidCallback(StackString),
    #[error("Map id must be set before rendering")]
    MissingMapId,
    #[error("HandlebarsTemplateError {0}")]
    HandlebarsTemplateError(Box<HandlebarsTemplateError>),
    #[error("HandlebarsRenderError {0}")]
    HandlebarsRenderError(Box<HandlebarsRenderError>),
    #[error("EnvyError {0}")]
    EnvyError(Box<EnvyError>),
    #[error("UrlParseError {0}")]
    UrlParseError(#[from] UrlParseError),
    #[error("io Error {0}")]
    IoError(#[from] std::io::Error),
    #[error("SerdeJsonError {0}")]
    SerdeJsonError(#[from] SerdeJsonError),
    #[error("YamlError {0}")]
    YamlError(#[from] YamlError),
    #[error("{0}")]
    StaticCustomError(&'static str),
    #[error("{0}")]
    CustomError(StackString),
}

impl From<HandlebarsTemplateError> for MapsError {
    fn from(value: HandlebarsTemplateError) -> Self {
        Self::HandlebarsTemplateError(value.into())
    }
}

impl From<HandlebarsRenderError> for MapsError {
    fn from(value: HandlebarsRenderError) -> Self {
        Self::HandlebarsRenderError(value.into())
    }
}

impl From<EnvyError> for MapsError {
    fn from(value: EnvyError) -> Self {
        Self::EnvyError(value.into())
    }
}

//! Serialization of compiled artifacts into output files
//!
//! Renderers only print what the compilers decided. They never look at the
//! schema and never write to disk; see [`crate::writer`] for that.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::compile::Artifacts;

mod cpp;
mod json;

pub use cpp::CppRenderer;
pub use json::JsonRenderer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("formatting failed")]
    Fmt(#[from] fmt::Error),
    #[error("could not serialize artifacts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{count} usages do not fit into an enumeration of at most {max} entries")]
    TooManyUsages { count: usize, max: usize },
    #[error("unknown output format '{0}', expected one of: cpp, json")]
    UnknownFormat(String),
}

/// One generated file, relative to the output directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(file_name: impl Into<String>, contents: String) -> Self {
        RenderedFile {
            file_name: file_name.into(),
            contents,
        }
    }
}

pub trait Renderer {
    fn name(&self) -> &'static str;

    fn render(&self, artifacts: &Artifacts) -> Result<Vec<RenderedFile>, RenderError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Cpp,
    Json,
}

impl Format {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Format::Cpp => Box::new(CppRenderer),
            Format::Json => Box::new(JsonRenderer),
        }
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Format::Cpp),
            "json" => Ok(Format::Json),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.renderer().name())
    }
}

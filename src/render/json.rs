use super::{RenderError, RenderedFile, Renderer};
use crate::compile::Artifacts;

pub const ARTIFACTS_FILE: &str = "plug_types.json";

/// The complete collected artifact as pretty-printed JSON
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, artifacts: &Artifacts) -> Result<Vec<RenderedFile>, RenderError> {
        let mut contents = serde_json::to_string_pretty(artifacts)?;
        contents.push('\n');
        Ok(vec![RenderedFile::new(ARTIFACTS_FILE, contents)])
    }
}

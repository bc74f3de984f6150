use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::codec::decode_overview;
use crate::error::{OverviewError, Result};
use crate::types::Overview;

const DOCUMENT: &str = "overview document";

/// Parses overview YAML text into the typed model.
pub fn parse_overview(text: &str) -> Result<Overview> {
    if text.trim().is_empty() {
        return Ok(Overview::default());
    }
    let root: Value =
        serde_yaml::from_str(text).map_err(|e| OverviewError::resource_load(DOCUMENT, e))?;
    decode_overview(&root)
}

pub fn load_overview(path: &Path) -> Result<Overview> {
    let text = fs::read_to_string(path)
        .map_err(|e| OverviewError::resource_load(path.display().to_string(), e))?;
    parse_overview(&text)
}

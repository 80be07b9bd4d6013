use std::{fs, path::Path};
use crate::{error::Result, types::ClipPathGroup};

impl ClipPathGroup {
    /// Serialize to indented JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the document as JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a previously written document
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON Schema describing the document
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ClipPathGroup)
    }
}

//! Text formats for config documents
//!
//! A [`Format`] turns a document value tree into text and back. Reading and
//! writing files is shared: writes go to a temporary sibling file that is then
//! renamed over the destination, so a crash never leaves a half-written file.

mod json;
mod toml;

pub use json::JsonFormat;
pub use toml::TomlFormat;

use crate::error::{Error, Result, read_file, write_file};
use crate::store::SaveOptions;
use log::info;
use serde_json::Value;
use std::path::Path;

/// Trait for text format implementations
pub trait Format: Clone + Send + Sync {
    /// Human-readable name used in error messages ("JSON", "TOML")
    fn name(&self) -> &'static str;

    /// File extension for this format, without the dot
    fn extension(&self) -> &str;

    /// Render a document as text
    fn encode(&self, doc: &Value, options: &SaveOptions) -> Result<String>;

    /// Parse text into a document
    fn decode(&self, text: &str) -> Result<Value>;

    /// Read and parse a file
    fn read(&self, path: &Path) -> Result<Value> {
        let content = read_file(path)?;
        self.decode(&content)
    }

    /// Render and write a file atomically
    fn write(&self, path: &Path, doc: &Value, options: &SaveOptions) -> Result<()> {
        let content = self.encode(doc, options)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // temp name keeps the full original file name
        let file_name = path.file_name().ok_or_else(|| Error::FileWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path must have a file name",
            ),
        })?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        write_file(&temp_path, &content)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }
        info!("Wrote {} document to {}", self.name(), path.display());
        Ok(())
    }
}

//! manifest.json data model
//!
//! Describes the set of thumbnails produced by one run so that a site build can
//! pick them up without globbing the output directory.

use crate::icons::IconKind;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Root structure of a manifest.json file
#[derive(Serialize, Debug, Clone)]
pub struct Manifest {
    /// One entry per generated image, in generation order
    pub images: Vec<ManifestEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// A single generated thumbnail
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// File name relative to the manifest's directory
    pub filename: String,

    /// Theme slug the image was generated for
    pub theme: String,

    /// Icon drawn on the image
    pub icon: IconKind,

    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// Format version of the manifest
    pub version: u8,

    /// Tool that wrote the manifest
    pub author: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            author: "blog-thumbs".to_string(),
        }
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            info: Info::default(),
        }
    }

    pub fn add_image(&mut self, entry: ManifestEntry) {
        self.images.push(entry);
    }

    /// Write the manifest as pretty-printed JSON into `dir`.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest.json")?;
        std::fs::write(dir.join(MANIFEST_FILE), json).context("Failed to write manifest.json")
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

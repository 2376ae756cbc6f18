//! Persistence — one JSON artifact per post ID.
//!
//! An artifact is written once and never mutated; its existence on disk is
//! the idempotency marker the driver uses to skip regeneration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generation::extract::PageContent;

/// The persisted output for one work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArtifact {
    pub keyword: String,
    pub knowledge_backbone: String,
    pub content: PageContent,
}

impl PageArtifact {
    /// Path of the artifact for a post ID: `<output_dir>/<post_id>.json`.
    pub fn path_for(output_dir: &Path, post_id: &str) -> PathBuf {
        output_dir.join(format!("{post_id}.json"))
    }

    /// Whether an artifact already exists for a post ID. Valid content and
    /// ErrorContent count equally — both are terminal.
    pub fn exists(output_dir: &Path, post_id: &str) -> bool {
        Self::path_for(output_dir, post_id).exists()
    }

    /// Writes the artifact as human-indented UTF-8 JSON, creating the output
    /// directory if needed.
    pub fn write(&self, output_dir: &Path, post_id: &str) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

        let path = Self::path_for(output_dir, post_id);
        let json = serde_json::to_string_pretty(self).context("failed to serialize artifact")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write artifact {}", path.display()))?;

        Ok(path)
    }

    /// Reads an artifact back. Used by tests and post-run inspection.
    #[allow(dead_code)]
    pub fn read(output_dir: &Path, post_id: &str) -> Result<Self> {
        let path = Self::path_for(output_dir, post_id);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("artifact {} is not valid JSON", path.display()))
    }
}

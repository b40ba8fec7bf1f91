//! Remember the last emitted text so callers can report whether it changed.
use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Previous status text plus the file it is persisted in.
pub struct LastText {
    text: String,
    path: PathBuf,
}

impl LastText {
    /// Read the previous text from `path`; an unreadable file counts as empty.
    pub fn open(path: &Path) -> Self {
        Self {
            text: fs::read_to_string(path).unwrap_or_default(),
            path: path.to_path_buf(),
        }
    }

    /// Store `text`, returning whether it differs from the previous one.
    pub fn update(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        text.clone_into(&mut self.text);
        true
    }

    /// Atomically replace the cache file with the current text.
    pub fn persist(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("cache path has no parent directory")?;
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

        // Same directory as the target so the rename stays on one filesystem.
        let mut tmp = tempfile::Builder::new()
            .prefix(".last.")
            .tempfile_in(dir)
            .context("create temp cache file")?;
        tmp.write_all(self.text.as_bytes())
            .context("write temp cache file")?;
        commit(tmp, &self.path)
    }
}

fn commit(tmp: NamedTempFile, path: &Path) -> Result<()> {
    tmp.persist(path)
        .map(drop)
        .with_context(|| format!("rename temp cache -> {}", path.display()))
}

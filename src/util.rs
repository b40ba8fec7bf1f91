//! Input helpers used across the crate.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// Read a whole document from `path`, or from stdin when `path` is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.toml");
        fs::write(&path, "[status]\n").unwrap();
        assert_eq!(read_source(&path).unwrap(), "[status]\n");
    }

    #[test]
    fn missing_file_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = read_source(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }
}

//! Figure store: the images found in the figures directory.

use std::path::{Path, PathBuf};

use tracing::debug;

const FIGURE_EXTENSION: &str = "png";

#[derive(Clone, Debug)]
pub struct FigureStore {
  dir: PathBuf,
}

impl FigureStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Sorted `.png` file names, re-read on every call.
  /// A missing or unreadable directory yields no figures.
  pub fn list(&self) -> Vec<String> {
    let entries = match std::fs::read_dir(&self.dir) {
      Ok(entries) => entries,
      Err(e) => {
        debug!(target: "survey", dir = %self.dir.display(), error = %e, "Figures directory unavailable");
        return Vec::new();
      }
    };

    let mut names: Vec<String> = entries
      .filter_map(Result::ok)
      .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
      .map(|e| e.path())
      .filter(|p| {
        p.extension()
          .and_then(|ext| ext.to_str())
          .map(|ext| ext.eq_ignore_ascii_case(FIGURE_EXTENSION))
          .unwrap_or(false)
      })
      .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
      .collect();
    names.sort();
    names
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lists_only_png_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.png", "a.PNG", "c.jpg", "notes.txt", "Z.png"] {
      std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    std::fs::create_dir(dir.path().join("nested.png")).unwrap();

    let store = FigureStore::new(dir.path());
    assert_eq!(store.list(), vec!["Z.png", "a.PNG", "b.png"]);
  }

  #[test]
  fn missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path().join("does-not-exist"));
    assert!(store.list().is_empty());
  }

  #[test]
  fn listing_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path());
    assert!(store.list().is_empty());
    std::fs::write(dir.path().join("new.png"), b"x").unwrap();
    assert_eq!(store.list(), vec!["new.png"]);
  }
}

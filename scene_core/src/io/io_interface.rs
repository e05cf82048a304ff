// scene_core/src/io/io_interface.rs
use crate::storage::path_utils::*;
use crate::constants::DEFAULT_FILE_URL;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use std::fs;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("'{0}' is outside the interface root.")]
    OutsideRoot(String),
    #[error("'{path}': {source}")]
    Fs {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    fn fs(path: &Path, source: std::io::Error) -> Self {
        IoError::Fs { path: path.display().to_string(), source }
    }
}

/// File and directory access for scripts, confined to one root folder.
///
/// Paths may be given with or without the `file_url` prefix:
/// with `file_url = "user://"`, `"user://saves/a.txt"` and `"saves/a.txt"`
/// resolve to the same file under `root`.
///
/// Confinement is lexical: `..` may not climb above `root`, but symlinks
/// already inside `root` are not resolved and may point elsewhere.
/// Listings skip symlinks entirely.
#[derive(Clone, Debug)]
pub struct IoInterface {
    pub file_url: String,
    root: PathBuf,
}

impl IoInterface {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_url(root, DEFAULT_FILE_URL)
    }

    pub fn with_url(root: impl Into<PathBuf>, file_url: &str) -> Self {
        Self {
            file_url: file_url.to_string(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a script path onto the filesystem.
    pub fn get_file_path(&self, path: &str) -> Result<PathBuf, IoError> {
        let rel = path.strip_prefix(self.file_url.as_str()).unwrap_or(path);
        let rel = normalize_relative(Path::new(rel))
            .ok_or_else(|| IoError::OutsideRoot(path.to_string()))?;
        Ok(self.root.join(rel))
    }

    pub fn load_text(&self, path: &str) -> Result<String, IoError> {
        let file = self.get_file_path(path)?;
        fs::read_to_string(&file).map_err(|e| IoError::fs(&file, e))
    }

    pub fn save_text(&self, path: &str, text: &str) -> Result<(), IoError> {
        self.save_binary(path, text.as_bytes())
    }

    pub fn load_binary(&self, path: &str) -> Result<Vec<u8>, IoError> {
        let file = self.get_file_path(path)?;
        fs::read(&file).map_err(|e| IoError::fs(&file, e))
    }

    pub fn save_binary(&self, path: &str, data: &[u8]) -> Result<(), IoError> {
        let file = self.get_file_path(path)?;
        fs::write(&file, data).map_err(|e| IoError::fs(&file, e))
    }

    /// Files below `path` at any depth, as sorted urls.
    pub fn get_file_list_all(&self, path: &str, extension: Option<&str>) -> Result<Vec<String>, IoError> {
        let dir = self.get_file_path(path)?;
        let mut out = Vec::new();
        self.collect_files(&dir, extension, true, &mut out)?;
        out.sort();
        Ok(out)
    }

    /// Files directly inside `path`, as sorted urls.
    pub fn get_file_list(&self, path: &str, extension: Option<&str>) -> Result<Vec<String>, IoError> {
        let dir = self.get_file_path(path)?;
        let mut out = Vec::new();
        self.collect_files(&dir, extension, false, &mut out)?;
        out.sort();
        Ok(out)
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.get_file_path(path).is_ok_and(|p| p.is_file())
    }

    pub fn delete_file(&self, path: &str) -> Result<(), IoError> {
        let file = self.get_file_path(path)?;
        fs::remove_file(&file).map_err(|e| IoError::fs(&file, e))
    }

    /// Moves or renames a file. Missing destination folders are not created.
    pub fn move_file(&self, from: &str, to: &str) -> Result<(), IoError> {
        let src = self.get_file_path(from)?;
        let dst = self.get_file_path(to)?;
        fs::rename(&src, &dst).map_err(|e| IoError::fs(&src, e))
    }

    /// Creates the directory and any missing parents.
    pub fn create_directory(&self, path: &str) -> Result<(), IoError> {
        let dir = self.get_file_path(path)?;
        fs::create_dir_all(&dir).map_err(|e| IoError::fs(&dir, e))
    }

    /// Deletes the directory and everything in it. The root itself is kept.
    pub fn delete_directory(&self, path: &str) -> Result<(), IoError> {
        let dir = self.get_file_path(path)?;
        if dir == self.root {
            return Err(IoError::OutsideRoot(path.to_string()));
        }
        fs::remove_dir_all(&dir).map_err(|e| IoError::fs(&dir, e))
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.get_file_path(path).is_ok_and(|p| p.is_dir())
    }

    fn collect_files(
        &self,
        dir: &Path,
        extension: Option<&str>,
        recursive: bool,
        out: &mut Vec<String>,
    ) -> Result<(), IoError> {
        let entries = fs::read_dir(dir).map_err(|e| IoError::fs(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| IoError::fs(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| IoError::fs(&path, e))?;
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                if recursive {
                    self.collect_files(&path, extension, recursive, out)?;
                }
            } else if has_extension(&path, extension) {
                out.push(self.to_url(&path));
            }
        }
        Ok(())
    }

    fn to_url(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        format!("{}{}", self.file_url, to_url_path(rel))
    }
}

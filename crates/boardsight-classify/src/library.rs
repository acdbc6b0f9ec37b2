//! Labeled reference images loaded from a directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    #[error("failed to read reference directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reference library root {0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("reference library has {found} files, limit is {limit}")]
    TooManyReferences { found: usize, limit: usize },
}

fn default_max_entries() -> usize {
    256
}

/// Loading options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryParams {
    /// Upper bound on candidate files; classification cost is linear in it.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for LibraryParams {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// One labeled reference.
#[derive(Clone, Debug)]
pub struct ReferenceImage {
    pub label: String,
    /// Source file, `None` for in-memory entries.
    pub path: Option<PathBuf>,
    pub pixels: DynamicImage,
}

/// A file that was found but could not be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedReference {
    pub path: PathBuf,
    pub reason: String,
}

/// Read-only set of references, in lexicographic path order.
///
/// Load once and share by reference; nothing mutates it except an explicit
/// [`ReferenceLibrary::reload`].
#[derive(Clone, Debug, Default)]
pub struct ReferenceLibrary {
    root: Option<PathBuf>,
    params: LibraryParams,
    entries: Vec<ReferenceImage>,
    skipped: Vec<SkippedReference>,
}

impl ReferenceLibrary {
    /// Walk `root` recursively and decode every file as an image.
    ///
    /// Each file's stem is its label; the directory structure below `root`
    /// carries no meaning. Undecodable files are skipped and recorded in
    /// [`skipped`](Self::skipped).
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(root, params), fields(root = %root.as_ref().display()))
    )]
    pub fn load_dir(root: impl AsRef<Path>, params: &LibraryParams) -> Result<Self, LibraryError> {
        let root = root.as_ref().to_path_buf();
        let (entries, skipped) = load_entries(&root, params)?;
        Ok(Self {
            root: Some(root),
            params: params.clone(),
            entries,
            skipped,
        })
    }

    /// Build an in-memory library; entries keep the given order.
    pub fn from_entries(entries: Vec<ReferenceImage>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Re-read the directory this library was loaded from.
    ///
    /// In-memory libraries are left untouched. On error the previous
    /// contents are kept.
    pub fn reload(&mut self) -> Result<(), LibraryError> {
        let Some(root) = self.root.as_ref() else {
            return Ok(());
        };
        let (entries, skipped) = load_entries(root, &self.params)?;
        self.entries = entries;
        self.skipped = skipped;
        Ok(())
    }

    #[inline]
    pub fn entries(&self) -> &[ReferenceImage] {
        &self.entries
    }

    #[inline]
    pub fn skipped(&self) -> &[SkippedReference] {
        &self.skipped
    }

    #[inline]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

fn load_entries(
    root: &Path,
    params: &LibraryParams,
) -> Result<(Vec<ReferenceImage>, Vec<SkippedReference>), LibraryError> {
    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    if files.len() > params.max_entries {
        return Err(LibraryError::TooManyReferences {
            found: files.len(),
            limit: params.max_entries,
        });
    }
    files.sort();

    let mut entries = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for path in files {
        match decode_reference(&path) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                log::warn!("skipping reference {}: {reason}", path.display());
                skipped.push(SkippedReference { path, reason });
            }
        }
    }

    log::info!(
        "loaded {} references from {} ({} skipped)",
        entries.len(),
        root.display(),
        skipped.len()
    );
    Ok((entries, skipped))
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LibraryError> {
    let io_err = |source| LibraryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_err)?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn decode_reference(path: &Path) -> Result<ReferenceImage, String> {
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "file has no name stem".to_string())?;
    let pixels = image::open(path).map_err(|e| e.to_string())?;
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err("image is empty".to_string());
    }
    Ok(ReferenceImage {
        label,
        path: Some(path.to_path_buf()),
        pixels,
    })
}

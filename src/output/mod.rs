// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Image output directory.
//!
//! Rendered images are written atomically (temp file, then rename) to
//! `<dir>/<stem>.<ext>`, where the stem is derived from the caller's diagram name and
//! cannot escape the directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::render::ImageFormat;

const DEFAULT_DIR_NAME: &str = "architecture_diagrams";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("refusing to write through symlink {path:?}")]
    SymlinkRefused { path: PathBuf },
}

/// Turns a caller-chosen diagram name into a safe file stem.
///
/// Characters outside `[A-Za-z0-9._-]` become `_` and leading dots are dropped, so the
/// stem never names a parent directory or a hidden file. Returns `None` when nothing
/// usable remains.
pub fn sanitize_stem(name: &str) -> Option<String> {
    let mapped = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect::<String>();
    let stem = mapped.trim_start_matches('.');
    (!stem.is_empty()).then(|| stem.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_DIR_NAME))
    }
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn image_path(&self, stem: &str, format: ImageFormat) -> PathBuf {
        self.root.join(format!("{stem}.{}", format.extension()))
    }

    /// Writes `bytes` to `<root>/<stem>.<ext>`, replacing any previous image.
    pub fn write_image(
        &self,
        stem: &str,
        format: ImageFormat,
        bytes: &[u8],
    ) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.root)
            .map_err(|source| OutputError::Io { path: self.root.clone(), source })?;

        let path = self.image_path(stem, format);
        match fs::symlink_metadata(&path) {
            Ok(md) if md.file_type().is_symlink() => {
                return Err(OutputError::SymlinkRefused { path });
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(OutputError::Io { path, source }),
        }

        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let tmp_path = self.root.join(format!(
            ".topodraw.tmp.{stem}.{}.{nanos}",
            std::process::id()
        ));
        fs::write(&tmp_path, bytes)
            .map_err(|source| OutputError::Io { path: tmp_path.clone(), source })?;
        publish(&tmp_path, path)
    }

    pub fn read_image(&self, path: &Path) -> Result<Vec<u8>, OutputError> {
        fs::read(path).map_err(|source| OutputError::Io { path: path.to_path_buf(), source })
    }
}

/// Moves a fully written temp file onto the image path.
///
/// Windows refuses to rename over an existing file; there the previous image is removed
/// and the move retried. The temp file never outlives a failed move.
fn publish(tmp_path: &Path, path: PathBuf) -> Result<PathBuf, OutputError> {
    let mut moved = fs::rename(tmp_path, &path);
    if cfg!(windows) && moved.is_err() && path.is_file() {
        let _ = fs::remove_file(&path);
        moved = fs::rename(tmp_path, &path);
    }
    match moved {
        Ok(()) => Ok(path),
        Err(source) => {
            let _ = fs::remove_file(tmp_path);
            Err(OutputError::Io { path, source })
        }
    }
}

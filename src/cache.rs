use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::model::beatmap::BeatmapInfo;

/// Makes sure beatmap files exist on disk before they are calculated.
///
/// Implementors are shared between concurrently running calculators so
/// they are responsible for their own synchronization, e.g. to avoid
/// fetching the same beatmap twice.
pub trait BeatmapCache: Send + Sync {
    /// The deterministic location of a beatmap's file.
    fn path(&self, beatmap_id: u32) -> PathBuf;

    /// Materialize the beatmap's file at `path` if it's not already there.
    fn ensure_cached(&self, path: &Path, map: &BeatmapInfo) -> Result<(), CacheError>;
}

/// Provides the content of `.osu` files that are missing locally.
pub trait BeatmapSource: Send + Sync {
    fn fetch(&self, map: &BeatmapInfo) -> Result<Vec<u8>, CacheError>;
}

/// A [`BeatmapSource`] that never provides anything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSource;

impl BeatmapSource for NoSource {
    fn fetch(&self, map: &BeatmapInfo) -> Result<Vec<u8>, CacheError> {
        Err(CacheError::Missing {
            beatmap_id: map.beatmap_id,
        })
    }
}

/// Errors while preparing a beatmap file.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("beatmap {beatmap_id} is not cached and no source is available")]
    Missing { beatmap_id: u32 },
    #[error("received empty file for beatmap {beatmap_id}")]
    EmptyFile { beatmap_id: u32 },
    #[error("failed to fetch beatmap {beatmap_id}: {reason}")]
    Fetch { beatmap_id: u32, reason: String },
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// [`BeatmapCache`] storing `<beatmap_id>.osu` files in a single folder.
pub struct FileBeatmapCache<S = NoSource> {
    folder: PathBuf,
    source: S,
}

impl FileBeatmapCache {
    /// Create a cache that only uses files already present in `folder`.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            source: NoSource,
        }
    }
}

impl<S> FileBeatmapCache<S> {
    /// Fetch missing files from the given source.
    pub fn with_source<T: BeatmapSource>(self, source: T) -> FileBeatmapCache<T> {
        FileBeatmapCache {
            folder: self.folder,
            source,
        }
    }

}

impl<S: BeatmapSource> FileBeatmapCache<S> {
    fn store(&self, path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: path.to_owned(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(parent).map_err(io_err)?;

        // One temporary file per writer, renamed into place once complete
        let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
        temp.write_all(bytes).map_err(io_err)?;
        temp.persist(path).map_err(|err| io_err(err.error))?;

        Ok(())
    }
}

fn is_present(path: &Path) -> bool {
    fs::metadata(path).map_or(false, |meta| meta.is_file() && meta.len() > 0)
}

impl<S: BeatmapSource> BeatmapCache for FileBeatmapCache<S> {
    fn path(&self, beatmap_id: u32) -> PathBuf {
        self.folder.join(format!("{beatmap_id}.osu"))
    }

    fn ensure_cached(&self, path: &Path, map: &BeatmapInfo) -> Result<(), CacheError> {
        if is_present(path) {
            return Ok(());
        }

        tracing::debug!(beatmap_id = map.beatmap_id, "Beatmap not cached, fetching");

        let bytes = self.source.fetch(map)?;

        if bytes.is_empty() {
            return Err(CacheError::EmptyFile {
                beatmap_id: map.beatmap_id,
            });
        }

        self.store(path, &bytes)
    }
}

impl<S> Debug for FileBeatmapCache<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FileBeatmapCache")
            .field("folder", &self.folder)
            .finish_non_exhaustive()
    }
}

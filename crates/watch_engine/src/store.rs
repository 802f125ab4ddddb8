use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use watch_core::Link;
use watch_logging::{watch_debug, watch_info};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read link list {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("link list {path:?} is not a JSON array of strings: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize link list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// The links listed on the source page at the end of the last completed check.
///
/// Persisted as a JSON array in insertion order and always replaced as a whole.
#[derive(Debug)]
pub struct ListStore {
    links: Vec<Link>,
    writer: AtomicFileWriter,
}

impl ListStore {
    /// Loads the list from `path`. A missing file is a first run and yields an
    /// empty list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let links = load_links(&path)?;
        watch_info!("Loaded {} stored links from {:?}", links.len(), path);
        Ok(Self {
            links,
            writer: AtomicFileWriter::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        self.writer.target()
    }

    pub fn current(&self) -> &[Link] {
        &self.links
    }

    /// Overwrites the stored list. Memory is only updated once the file write
    /// succeeded, so on error both still hold the previous list.
    pub fn replace(&mut self, links: Vec<Link>) -> Result<(), StoreError> {
        let content = serde_json::to_string(&links)?;
        self.writer.write(&content)?;
        watch_debug!("Stored {} links in {:?}", links.len(), self.path());
        self.links = links;
        Ok(())
    }
}

fn load_links(path: &Path) -> Result<Vec<Link>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

use std::path::PathBuf;
use std::fs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::segment::SegmentId;

/// Directory structure for data files
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,      // Root directory
    pub segments_dir: PathBuf,  // Stored field segments (.seg files)
}

impl StorageLayout {
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        let segments_dir = base_dir.join("segments");

        fs::create_dir_all(&segments_dir)?;

        Ok(StorageLayout {
            base_dir,
            segments_dir,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.storage_path.clone())
    }

    /// One file per segment generation; rewriting a segment bumps the generation.
    pub fn segment_path(&self, id: &SegmentId, generation: u64) -> PathBuf {
        self.segments_dir.join(format!("{}_{}.seg", id.0, generation))
    }
}

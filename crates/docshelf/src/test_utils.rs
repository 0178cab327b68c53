use crate::config::ShelfConfig;
use crate::shelf::Shelf;
use crate::store::collection::Collection;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub shelf: Shelf,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(ShelfConfig::default())
    }

    pub fn with_config(config: ShelfConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let shelf = Shelf::open(&root, config).expect("failed to open shelf");
        Self {
            _temp_dir: temp_dir,
            shelf,
            root,
        }
    }

    /// Create (or reopen) a collection in the test shelf.
    pub fn collection(&self, name: &str) -> Collection {
        self.shelf
            .collection(name)
            .expect("failed to create collection")
    }
}

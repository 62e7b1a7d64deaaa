//! Helpers for integration tests.

use moments_storefront::repository::StoreRepository;
use moments_storefront::storage::FileStore;
use tempfile::TempDir;

/// Temporary backing file used in integration tests.
///
/// The directory is removed when the value drops. Opening the repository
/// twice over the same store models an application restart.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create a temp dir.");
        TestStore { dir }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("storefront.json")
    }

    pub fn repository(&self) -> StoreRepository<FileStore> {
        let store = FileStore::open(self.path()).expect("Failed to open the store.");
        StoreRepository::new(store)
    }
}

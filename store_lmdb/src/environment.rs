//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

const IDENTITIES_DB: &str = "identities";
const PENDING_TX_DB: &str = "pending_tx";
const USED_DOCUMENTS_DB: &str = "used_documents";
const PUSH_QUEUE_DB: &str = "push_queue";

const MAX_DBS: u32 = 4;

/// Default memory map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Clone)]
pub struct LmdbIdentityStore {
    pub(crate) env: Arc<Env>,
    pub(crate) identities_db: Database<Bytes, Bytes>,
    pub(crate) pending_db: Database<Bytes, Bytes>,
    pub(crate) documents_db: Database<Bytes, Bytes>,
    pub(crate) queue_db: Database<Bytes, Bytes>,
}

impl LmdbIdentityStore {
    /// Open or create an environment at `path` with the default map size.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        Self::open_with_map_size(path, DEFAULT_MAP_SIZE)
    }

    /// Open or create an environment at `path`, creating the directory and
    /// any missing databases.
    pub fn open_with_map_size(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process per path and the
        // data file is not modified by anything outside LMDB.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let identities_db = env.create_database(&mut wtxn, Some(IDENTITIES_DB))?;
        let pending_db = env.create_database(&mut wtxn, Some(PENDING_TX_DB))?;
        let documents_db = env.create_database(&mut wtxn, Some(USED_DOCUMENTS_DB))?;
        let queue_db = env.create_database(&mut wtxn, Some(PUSH_QUEUE_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened identity store");

        Ok(Self {
            env: Arc::new(env),
            identities_db,
            pending_db,
            documents_db,
            queue_db,
        })
    }

    /// Flush the memory map to disk.
    pub fn sync(&self) -> Result<(), LmdbError> {
        self.env.force_sync()?;
        Ok(())
    }
}

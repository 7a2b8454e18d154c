use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{StorageError, StorageResult};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".cliente-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "clientes.sqlite";

/// Resolve the default path of the SQLite database inside the user's home.
/// The path is only a convention; callers that need a different location
/// (tests, the `--db` flag) construct the store with an explicit path.
pub fn default_db_path() -> StorageResult<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(StorageError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Open a connection to the database file, creating parent directories on
/// the way. Every store operation goes through here and closes the
/// connection when it is done; nothing is pooled or reused.
pub(crate) fn open(path: &Path) -> StorageResult<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    Connection::open(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        source,
    })
}

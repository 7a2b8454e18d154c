use std::cell::Cell;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension};
use tracing::{error, warn};

use crate::db::connection;
use crate::error::{StorageError, StorageResult};
use crate::models::Cliente;

/// Schema of the single Cliente table. `AUTOINCREMENT` keeps deleted keys
/// from being handed out again, so an `id` observed once stays unambiguous
/// for the lifetime of the database file.
const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS Cliente (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    LastName TEXT NOT NULL,
    Age INT NOT NULL,
    Address TEXT NOT NULL
)";

/// Durable CRUD access to Cliente records in an embedded SQLite file.
///
/// Each operation opens and closes its own connection; the store itself only
/// carries the file path plus a flag remembering whether the schema has been
/// created. That keeps the type cheap to share behind an `Rc` and safe to
/// drop at any point, at the cost of one open per call. Fine for a
/// single-user desktop database, a liability anywhere bigger.
pub struct ClienteStore {
    path: PathBuf,
    /// Set once the table exists; cleared by `reset_schema` so the next
    /// operation re-creates it.
    initialized: Cell<bool>,
}

impl ClienteStore {
    /// Build a store around an explicit database file path. The file and its
    /// parent directories are created lazily on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: Cell::new(false),
        }
    }

    /// Build a store at the conventional per-user location
    /// (`~/.cliente-manager/clientes.sqlite`).
    pub fn open_default() -> StorageResult<Self> {
        Ok(Self::new(connection::default_db_path()?))
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> StorageResult<Connection> {
        connection::open(&self.path)
    }

    /// Create the Cliente table if this store instance has not done so yet.
    /// A creation failure is logged here, where the path and SQL are known,
    /// and then propagated; the store is unusable until a retry succeeds.
    fn init(&self) -> StorageResult<()> {
        if self.initialized.get() {
            return Ok(());
        }

        let conn = self.connect()?;
        if let Err(err) = conn.execute(CREATE_TABLE_SQL, []) {
            error!("failed to create Cliente table: {err}");
            return Err(StorageError::Schema(err));
        }

        self.initialized.set(true);
        Ok(())
    }

    /// Retrieve every Cliente in storage order. The query has no ORDER BY on
    /// purpose: the list screen shows records the way the engine returns
    /// them.
    pub fn list(&self) -> StorageResult<Vec<Cliente>> {
        self.init()?;
        let conn = self.connect()?;

        let mut stmt = conn.prepare("SELECT ID, Name, LastName, Age, Address FROM Cliente")?;
        let clientes = stmt
            .query_map([], |row| {
                Ok(Cliente {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    last_name: row.get(2)?,
                    age: row.get(3)?,
                    address: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(clientes)
    }

    /// Look up a single Cliente by id. A missing row is an ordinary `None`,
    /// not an error; callers decide whether that is worth telling the user.
    pub fn get(&self, id: i64) -> StorageResult<Option<Cliente>> {
        self.init()?;
        let conn = self.connect()?;

        let cliente = conn
            .query_row(
                "SELECT ID, Name, LastName, Age, Address FROM Cliente WHERE ID = ?1",
                params![id],
                |row| {
                    Ok(Cliente {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        last_name: row.get(2)?,
                        age: row.get(3)?,
                        address: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(cliente)
    }

    /// Persist a Cliente and return its id. A record with `id == 0` is
    /// inserted and receives the engine-assigned key back onto the struct;
    /// anything else updates the matching row in place. An update whose id
    /// matches no row succeeds without touching anything and returns the id
    /// unchanged; callers cannot tell it apart from a real update.
    pub fn save(&self, cliente: &mut Cliente) -> StorageResult<i64> {
        self.init()?;
        let conn = self.connect()?;

        if cliente.is_new() {
            conn.execute(
                "INSERT INTO Cliente (Name, LastName, Age, Address) VALUES (?1, ?2, ?3, ?4)",
                params![cliente.name, cliente.last_name, cliente.age, cliente.address],
            )
            .map_err(map_constraint)?;
            cliente.id = conn.last_insert_rowid();
        } else {
            conn.execute(
                "UPDATE Cliente SET Name = ?1, LastName = ?2, Age = ?3, Address = ?4
                 WHERE ID = ?5",
                params![
                    cliente.name,
                    cliente.last_name,
                    cliente.age,
                    cliente.address,
                    cliente.id
                ],
            )
            .map_err(map_constraint)?;
        }

        Ok(cliente.id)
    }

    /// Delete the row matching the record's id and report how many rows went
    /// away (0 or 1). The in-memory record is left untouched; it simply no
    /// longer corresponds to anything stored.
    pub fn delete(&self, cliente: &Cliente) -> StorageResult<usize> {
        self.init()?;
        let conn = self.connect()?;

        let deleted = conn.execute("DELETE FROM Cliente WHERE ID = ?1", params![cliente.id])?;
        Ok(deleted)
    }

    /// Drop the Cliente table and clear the initialized flag so the next
    /// operation re-creates an empty one. Destructive and irreversible;
    /// exists for test isolation, not for the application itself.
    pub fn reset_schema(&self) -> StorageResult<()> {
        warn!("dropping Cliente table at {}", self.path.display());
        let conn = self.connect()?;
        conn.execute("DROP TABLE IF EXISTS Cliente", [])?;
        self.initialized.set(false);
        Ok(())
    }
}

/// Classify SQLite constraint violations separately from other SQL failures
/// so callers can show a friendlier message than the raw engine text.
fn map_constraint(err: SqlError) -> StorageError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StorageError::Constraint(err)
    } else {
        StorageError::Sql(err)
    }
}

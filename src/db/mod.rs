//! Persistence module split across logical submodules.

mod clientes;
mod connection;

pub use clientes::ClienteStore;
pub use connection::default_db_path;

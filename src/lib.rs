//! Core library of the Cliente manager: an embedded-SQLite record store, a
//! route-string router with an explicit navigation context, a bounded
//! notification channel, and the controllers behind the list and detail
//! screens. The presentation layer (the `bin` target here, a GUI shell
//! elsewhere) embeds these pieces and renders from controller state.
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod nav;
pub mod notify;

/// The persistence layer and its conventional database location. These are
/// what `main.rs` touches first when wiring the application up.
pub use db::{default_db_path, ClienteStore};

/// The sole persisted domain type.
pub use models::Cliente;

/// The pieces an embedding shell needs to drive navigation.
pub use controllers::{standard_routes, Controller, Destination, Services};
pub use nav::{NavOutcome, Navigator, Router};

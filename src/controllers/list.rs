//! Controller behind the Cliente list screen.

use std::rc::Rc;

use tracing::warn;

use crate::controllers::{Controller, Services};
use crate::db::ClienteStore;
use crate::error::StorageResult;
use crate::models::Cliente;
use crate::nav::{Navigator, Query};

/// Observable state and actions for the list of every stored Cliente.
pub struct ClienteListController {
    store: Rc<ClienteStore>,
    navigator: Navigator,
    clientes: Vec<Cliente>,
}

impl ClienteListController {
    pub fn new(services: &Services) -> Self {
        Self {
            store: Rc::clone(&services.store),
            navigator: services.navigator.clone(),
            clientes: Vec::new(),
        }
    }

    /// Records as of the last load, in storage order.
    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    /// Request navigation to the detail screen for an existing record.
    pub fn open(&self, cliente: &Cliente) {
        self.navigator.go(format!("cliente?id={}", cliente.id));
    }

    /// Request navigation to an empty detail screen.
    pub fn add(&self) {
        self.navigator.go("cliente");
    }

    fn reload(&mut self) -> StorageResult<()> {
        self.clientes = self.store.list()?;
        Ok(())
    }
}

impl Controller for ClienteListController {
    fn title(&self) -> &str {
        "Clientes"
    }

    /// A `refresh` key means a detail screen below us changed something.
    /// The reload is fire-and-forget: a failure keeps the stale list and is
    /// only logged, since there is no caller to hand the error to.
    fn apply_query_attributes(&mut self, query: &Query) {
        if query.contains("refresh") {
            if let Err(err) = self.reload() {
                warn!("refresh of cliente list failed: {err}");
            }
        }
    }

    fn initialize(&mut self, _params: Option<&Query>) -> StorageResult<()> {
        self.reload()
    }
}

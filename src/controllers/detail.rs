//! Controller behind the Cliente detail screen.

use std::rc::Rc;

use crate::controllers::form::ClienteForm;
use crate::controllers::{Controller, Services};
use crate::db::ClienteStore;
use crate::error::StorageResult;
use crate::models::Cliente;
use crate::nav::{Navigator, Query};
use crate::notify::Notifier;

const TITLE_NEW: &str = "Novo Cliente";
const TITLE_EDIT: &str = "Editar Cliente";

/// Observable state and actions for creating, editing, and deleting one
/// Cliente.
///
/// The controller goes through `apply_query_attributes` and `initialize`
/// before it is usable: an `id` parameter greater than zero loads that
/// record for editing, anything else prepares a fresh one. A stale id leaves
/// the controller without a record; save and delete then report instead of
/// acting.
pub struct ClienteDetailController {
    store: Rc<ClienteStore>,
    notifier: Notifier,
    navigator: Navigator,
    pub form: ClienteForm,
    pub can_delete: bool,
    title: &'static str,
    cliente: Option<Cliente>,
    pending_query: Option<Query>,
}

impl ClienteDetailController {
    pub fn new(services: &Services) -> Self {
        Self {
            store: Rc::clone(&services.store),
            notifier: services.notifier.clone(),
            navigator: services.navigator.clone(),
            form: ClienteForm::default(),
            can_delete: false,
            title: "",
            cliente: None,
            pending_query: None,
        }
    }

    /// Record being edited, once loaded. Carries the assigned id after a
    /// successful first save.
    pub fn cliente(&self) -> Option<&Cliente> {
        self.cliente.as_ref()
    }

    /// Validate the form and persist the record.
    ///
    /// The first validation failure is reported and aborts the save. On
    /// success the parent list is asked to refresh and the user gets a
    /// confirmation toast.
    pub fn save(&mut self) {
        let Some(cliente) = self.cliente.as_mut() else {
            self.notifier.report("Cliente é nulo. Não foi possível salvar.");
            return;
        };

        let (name, last_name, age, address) = match self.form.parse_inputs() {
            Ok(parsed) => parsed,
            Err(err) => {
                self.notifier.report(&err);
                return;
            }
        };

        cliente.name = name;
        cliente.last_name = last_name;
        cliente.age = age;
        cliente.address = address;

        if let Err(err) = self.store.save(cliente) {
            self.notifier.report(&err);
            return;
        }

        self.navigator.go("..?refresh=true");
        self.notifier.info("Cliente salvo");
    }

    /// Delete the record and return to the list.
    ///
    /// A record that was never persisted has nothing to delete; the flow
    /// still returns to the list with the usual toast. The shell hides the
    /// action while `can_delete` is false, but calling it anyway is safe.
    pub fn delete(&mut self) {
        let Some(cliente) = self.cliente.as_ref() else {
            self.notifier
                .report("Cliente é nulo. Não foi possível deletar.");
            return;
        };

        if cliente.id > 0 {
            if let Err(err) = self.store.delete(cliente) {
                self.notifier.report(&err);
                return;
            }
        }

        self.navigator.go("..?refresh=true");
        self.notifier.info("Cliente deletado");
    }

    fn load(&mut self, query: Option<&Query>) -> StorageResult<()> {
        let id = query
            .and_then(|q| q.get("id"))
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);

        let Some(id) = id else {
            self.cliente = Some(Cliente::default());
            self.form = ClienteForm::default();
            self.title = TITLE_NEW;
            self.can_delete = false;
            return Ok(());
        };

        match self.store.get(id)? {
            Some(cliente) => {
                self.form = ClienteForm::from_cliente(&cliente);
                self.cliente = Some(cliente);
                self.title = TITLE_EDIT;
                self.can_delete = true;
            }
            None => {
                // The id came from a route string and nothing guarantees the
                // record still exists. Tell the user and stay without a
                // record; save and delete will refuse in turn.
                self.notifier
                    .report(&format!("Cliente Id {id} não é válido."));
            }
        }
        Ok(())
    }
}

impl Controller for ClienteDetailController {
    fn title(&self) -> &str {
        self.title
    }

    fn apply_query_attributes(&mut self, query: &Query) {
        self.pending_query = Some(query.clone());
    }

    fn initialize(&mut self, params: Option<&Query>) -> StorageResult<()> {
        let pending = self.pending_query.take();
        self.load(params.or(pending.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RouteRequest;
    use crate::notify::{self, NotificationFeed, Severity};
    use tempfile::TempDir;

    struct Harness {
        services: Services,
        feed: NotificationFeed,
        _tmp: TempDir,
    }

    fn harness() -> Harness {
        let tmp = TempDir::new().unwrap();
        let store = Rc::new(ClienteStore::new(tmp.path().join("clientes.sqlite")));
        let (notifier, feed) = notify::channel();
        Harness {
            services: Services {
                store,
                notifier,
                navigator: Navigator::new(),
            },
            feed,
            _tmp: tmp,
        }
    }

    fn seed(store: &ClienteStore) -> Cliente {
        let mut cliente = Cliente {
            id: 0,
            name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            age: 28,
            address: "Rua Azul 10".to_string(),
        };
        store.save(&mut cliente).unwrap();
        cliente
    }

    fn query_for(route: &str) -> Query {
        RouteRequest::parse(route).query
    }

    fn fill(form: &mut ClienteForm) {
        form.name = "Ana".to_string();
        form.last_name = "Silva".to_string();
        form.age = "28".to_string();
        form.address = "Rua Azul 10".to_string();
    }

    #[test]
    fn initialize_without_id_prepares_a_new_record() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);

        detail.initialize(None).unwrap();
        assert_eq!(detail.title(), "Novo Cliente");
        assert!(!detail.can_delete);
        assert_eq!(detail.cliente().unwrap().id, 0);
        assert!(detail.form.name.is_empty());
    }

    #[test]
    fn initialize_with_id_loads_the_record_for_editing() {
        let h = harness();
        let cliente = seed(&h.services.store);
        let mut detail = ClienteDetailController::new(&h.services);

        detail
            .initialize(Some(&query_for(&format!("cliente?id={}", cliente.id))))
            .unwrap();
        assert_eq!(detail.title(), "Editar Cliente");
        assert!(detail.can_delete);
        assert_eq!(detail.form.name, "Ana");
        assert_eq!(detail.form.age, "28");
        assert_eq!(detail.cliente().unwrap().id, cliente.id);
    }

    #[test]
    fn stale_id_reports_and_leaves_no_record() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);

        detail
            .initialize(Some(&query_for("cliente?id=999")))
            .unwrap();

        let note = h.feed.try_next().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.message, "Cliente Id 999 não é válido.");
        assert!(detail.cliente().is_none());
        assert!(!detail.can_delete);
        assert_eq!(detail.title(), "");
    }

    #[test]
    fn unparseable_or_nonpositive_id_prepares_a_new_record() {
        let h = harness();
        for route in ["cliente?id=abc", "cliente?id=0", "cliente?id=-4"] {
            let mut detail = ClienteDetailController::new(&h.services);
            detail.initialize(Some(&query_for(route))).unwrap();
            assert_eq!(detail.title(), "Novo Cliente", "route {route:?}");
            assert!(h.feed.try_next().is_none());
        }
    }

    #[test]
    fn stashed_query_feeds_initialize() {
        let h = harness();
        let cliente = seed(&h.services.store);
        let mut detail = ClienteDetailController::new(&h.services);

        detail.apply_query_attributes(&query_for(&format!("cliente?id={}", cliente.id)));
        detail.initialize(None).unwrap();
        assert_eq!(detail.title(), "Editar Cliente");
    }

    #[test]
    fn save_reports_the_first_violation_and_aborts() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);
        detail.initialize(None).unwrap();

        detail.save();

        assert_eq!(
            h.feed.try_next().unwrap().message,
            "O campo Nome não pode ser vazio."
        );
        assert!(h.services.navigator.take().is_none());
        assert!(h.services.store.list().unwrap().is_empty());
    }

    #[test]
    fn save_inserts_and_requests_a_refresh() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);
        detail.initialize(None).unwrap();
        fill(&mut detail.form);

        detail.save();

        let saved = detail.cliente().unwrap();
        assert!(saved.id > 0);
        assert_eq!(h.services.store.list().unwrap().len(), 1);
        assert_eq!(h.services.navigator.take().unwrap(), "..?refresh=true");

        let notes = h.feed.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Info);
        assert_eq!(notes[0].message, "Cliente salvo");
    }

    #[test]
    fn save_updates_the_loaded_record_in_place() {
        let h = harness();
        let cliente = seed(&h.services.store);
        let mut detail = ClienteDetailController::new(&h.services);
        detail
            .initialize(Some(&query_for(&format!("cliente?id={}", cliente.id))))
            .unwrap();

        detail.form.name = "Johnny".to_string();
        detail.save();

        let stored = h.services.store.get(cliente.id).unwrap().unwrap();
        assert_eq!(stored.name, "Johnny");
        assert_eq!(stored.last_name, "Silva");
        assert_eq!(detail.cliente().unwrap().id, cliente.id);
    }

    #[test]
    fn save_without_a_record_reports_the_null_message() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);
        fill(&mut detail.form);

        detail.save();

        assert_eq!(
            h.feed.try_next().unwrap().message,
            "Cliente é nulo. Não foi possível salvar."
        );
        assert!(h.services.navigator.take().is_none());
    }

    #[test]
    fn save_reports_storage_failures_and_stays_put() {
        let tmp = TempDir::new().unwrap();
        // Path is a directory, so the insert cannot open a connection.
        let store = Rc::new(ClienteStore::new(tmp.path()));
        let (notifier, feed) = notify::channel();
        let services = Services {
            store,
            notifier,
            navigator: Navigator::new(),
        };

        let mut detail = ClienteDetailController::new(&services);
        detail.initialize(None).unwrap();
        fill(&mut detail.form);

        detail.save();

        let note = feed.try_next().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert!(services.navigator.take().is_none());
    }

    #[test]
    fn delete_removes_the_persisted_record() {
        let h = harness();
        let cliente = seed(&h.services.store);
        let mut detail = ClienteDetailController::new(&h.services);
        detail
            .initialize(Some(&query_for(&format!("cliente?id={}", cliente.id))))
            .unwrap();

        detail.delete();

        assert!(h.services.store.list().unwrap().is_empty());
        assert_eq!(h.services.navigator.take().unwrap(), "..?refresh=true");
        assert_eq!(h.feed.try_next().unwrap().message, "Cliente deletado");
    }

    #[test]
    fn delete_of_an_unsaved_record_skips_storage_but_returns() {
        let h = harness();
        seed(&h.services.store);
        let mut detail = ClienteDetailController::new(&h.services);
        detail.initialize(None).unwrap();

        detail.delete();

        // Nothing was deleted, the flow still returns to the list.
        assert_eq!(h.services.store.list().unwrap().len(), 1);
        assert_eq!(h.services.navigator.take().unwrap(), "..?refresh=true");
        assert_eq!(h.feed.try_next().unwrap().message, "Cliente deletado");
    }

    #[test]
    fn delete_without_a_record_reports_the_null_message() {
        let h = harness();
        let mut detail = ClienteDetailController::new(&h.services);

        detail.delete();

        assert_eq!(
            h.feed.try_next().unwrap().message,
            "Cliente é nulo. Não foi possível deletar."
        );
        assert!(h.services.navigator.take().is_none());
    }
}

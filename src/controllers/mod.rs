//! Destination controllers and the protocol the router drives them with.
//!
//! A controller is the non-visual half of a screen: it owns the observable
//! state, talks to the store, reports to the user through the notifier, and
//! asks for navigation through the navigator. The router constructs one per
//! presented destination via the factories registered in the route table.

mod detail;
mod form;
mod list;

use std::rc::Rc;

pub use detail::ClienteDetailController;
pub use form::ClienteForm;
pub use list::ClienteListController;

use crate::db::ClienteStore;
use crate::error::StorageResult;
use crate::nav::{Navigator, Query, RouteTable};
use crate::notify::Notifier;

/// Everything a destination factory needs to build its controller. The
/// explicit bundle replaces a service locator: dependencies are visible at
/// the construction site, and tests assemble their own.
#[derive(Clone)]
pub struct Services {
    pub store: Rc<ClienteStore>,
    pub notifier: Notifier,
    pub navigator: Navigator,
}

/// Initialization protocol shared by every destination controller.
///
/// The router calls `apply_query_attributes` with the route's query as soon
/// as the controller exists, then `initialize` to load state. The split
/// mirrors the two delivery channels of the contract: the first is a
/// synchronous stash of the raw parameters, the second does the actual work
/// and may fail.
pub trait Controller {
    /// Title the shell shows for this destination.
    fn title(&self) -> &str;

    /// Receive the route's query parameters. Must not fail; controllers
    /// stash or act on what they recognize and ignore the rest. Also called
    /// on the revealed controller when a `..` route pops back to it.
    fn apply_query_attributes(&mut self, query: &Query);

    /// Load the controller's state. `params` carries the route query on
    /// first presentation and `None` when the embedding shell re-initializes
    /// a controller it built itself.
    fn initialize(&mut self, params: Option<&Query>) -> StorageResult<()>;
}

/// The concrete controllers a route can resolve to, as one type the
/// navigation context can hold without boxing.
pub enum Destination {
    ClienteList(ClienteListController),
    ClienteDetail(ClienteDetailController),
}

impl Destination {
    /// The list controller, when this destination is the list screen.
    pub fn as_list(&self) -> Option<&ClienteListController> {
        match self {
            Self::ClienteList(list) => Some(list),
            Self::ClienteDetail(_) => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ClienteListController> {
        match self {
            Self::ClienteList(list) => Some(list),
            Self::ClienteDetail(_) => None,
        }
    }

    /// The detail controller, when this destination is the detail screen.
    pub fn as_detail(&self) -> Option<&ClienteDetailController> {
        match self {
            Self::ClienteDetail(detail) => Some(detail),
            Self::ClienteList(_) => None,
        }
    }

    pub fn as_detail_mut(&mut self) -> Option<&mut ClienteDetailController> {
        match self {
            Self::ClienteDetail(detail) => Some(detail),
            Self::ClienteList(_) => None,
        }
    }
}

impl Controller for Destination {
    fn title(&self) -> &str {
        match self {
            Self::ClienteList(list) => list.title(),
            Self::ClienteDetail(detail) => detail.title(),
        }
    }

    fn apply_query_attributes(&mut self, query: &Query) {
        match self {
            Self::ClienteList(list) => list.apply_query_attributes(query),
            Self::ClienteDetail(detail) => detail.apply_query_attributes(query),
        }
    }

    fn initialize(&mut self, params: Option<&Query>) -> StorageResult<()> {
        match self {
            Self::ClienteList(list) => list.initialize(params),
            Self::ClienteDetail(detail) => detail.initialize(params),
        }
    }
}

/// The application's route table: `clientes` for the list screen, `cliente`
/// for the detail screen. Registered once at startup.
pub fn standard_routes() -> RouteTable {
    let mut table = RouteTable::new();
    table.register("clientes", |services| {
        Destination::ClienteList(ClienteListController::new(services))
    });
    table.register("cliente", |services| {
        Destination::ClienteDetail(ClienteDetailController::new(services))
    });
    table
}

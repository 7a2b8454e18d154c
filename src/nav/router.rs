//! Route dispatch and the navigation context.
//!
//! The router resolves route strings against a table of registered
//! destinations, runs the controller initialization protocol, and keeps the
//! stack of live destinations. Routes it does not recognize are handed back
//! to the embedding shell rather than treated as errors.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::controllers::{Controller, Destination, Services};
use crate::error::NavigationError;
use crate::nav::route::RouteRequest;

/// Constructs a destination's controller from the shared services.
pub type DestinationFactory = fn(&Services) -> Destination;

/// Static table mapping route keys to destination factories. Built once at
/// startup; the router only reads it.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<(String, DestinationFactory)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `key`. Registering a key twice keeps the
    /// first entry.
    pub fn register(&mut self, key: &str, factory: DestinationFactory) {
        if self.resolve(key).is_none() {
            self.routes.push((key.to_string(), factory));
        }
    }

    fn resolve(&self, path: &str) -> Option<DestinationFactory> {
        self.routes
            .iter()
            .find(|(key, _)| key == path)
            .map(|(_, factory)| *factory)
    }
}

/// How a destination is shown by the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// A separate window per destination.
    Window,
    /// Pushed onto the existing navigation stack.
    Push,
}

impl Presentation {
    /// Desktop Windows gives each destination its own window; every other
    /// platform pushes onto the stack.
    pub fn for_platform() -> Self {
        if cfg!(target_os = "windows") {
            Self::Window
        } else {
            Self::Push
        }
    }
}

/// A live destination on the navigation stack.
pub struct NavEntry {
    route: String,
    destination: Destination,
    presentation: Presentation,
}

impl NavEntry {
    /// Route key this entry was presented under.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Title reported by the destination's controller.
    pub fn title(&self) -> &str {
        self.destination.title()
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn destination_mut(&mut self) -> &mut Destination {
        &mut self.destination
    }
}

/// Stack of live destinations, root first. Replaces the ambient window and
/// page globals the router would otherwise reach for: everything the shell
/// needs to render is an entry here.
#[derive(Default)]
pub struct NavigationContext {
    stack: Vec<NavEntry>,
}

impl NavigationContext {
    pub fn entries(&self) -> &[NavEntry] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The entry currently in front of the user.
    pub fn active(&self) -> Option<&NavEntry> {
        self.stack.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut NavEntry> {
        self.stack.last_mut()
    }

    fn push(&mut self, entry: NavEntry) {
        self.stack.push(entry);
    }

    /// Remove the active entry. The root entry is never removed; popping at
    /// depth one (or zero) returns `None` and leaves the stack alone.
    fn pop(&mut self) -> Option<NavEntry> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop()
    }
}

/// Handle controllers use to request navigation without holding the router.
///
/// Requests are queued, not dispatched: a controller may ask to navigate in
/// the middle of being driven by the router, so the actual dispatch happens
/// when the owner calls [`Router::pump`]. Clones share one queue.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a route string for the next pump.
    pub fn go(&self, route: impl Into<String>) {
        self.queue.borrow_mut().push_back(route.into());
    }

    /// Number of queued requests not yet dispatched.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn take(&self) -> Option<String> {
        self.queue.borrow_mut().pop_front()
    }
}

/// What a navigation attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// A registered destination was constructed, initialized, and pushed.
    Presented { route: String },
    /// A parent navigation removed the active entry.
    Popped,
    /// The route names nothing registered here (or asked for the parent of
    /// the root); the verbatim string is returned for the embedding shell to
    /// handle.
    Forwarded { route: String },
}

/// Resolves route strings and owns the navigation context.
pub struct Router {
    table: RouteTable,
    services: Services,
    context: NavigationContext,
    presentation: Presentation,
}

impl Router {
    /// Router with the platform's native presentation style.
    pub fn new(table: RouteTable, services: Services) -> Self {
        Self::with_presentation(table, services, Presentation::for_platform())
    }

    /// Router with an explicit presentation style, for embedding shells and
    /// tests that pin one.
    pub fn with_presentation(
        table: RouteTable,
        services: Services,
        presentation: Presentation,
    ) -> Self {
        Self {
            table,
            services,
            context: NavigationContext::default(),
            presentation,
        }
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut NavigationContext {
        &mut self.context
    }

    /// Dispatch a single route string.
    ///
    /// `..` pops the active entry and delivers the query to the controller
    /// underneath. A registered key constructs the destination, runs
    /// `apply_query_attributes` then `initialize`, and pushes it. Anything
    /// else is forwarded untouched. Only a controller initialization failure
    /// is an error; unknown routes are not.
    pub fn navigate(&mut self, route: &str) -> Result<NavOutcome, NavigationError> {
        let request = RouteRequest::parse(route);

        if request.is_parent() {
            if self.context.pop().is_none() {
                debug!("nothing above the root to pop, forwarding {route:?}");
                return Ok(NavOutcome::Forwarded {
                    route: route.to_string(),
                });
            }
            if let Some(revealed) = self.context.active_mut() {
                revealed
                    .destination_mut()
                    .apply_query_attributes(&request.query);
            }
            return Ok(NavOutcome::Popped);
        }

        let Some(factory) = self.table.resolve(&request.path) else {
            debug!("no destination registered for {route:?}, forwarding");
            return Ok(NavOutcome::Forwarded {
                route: route.to_string(),
            });
        };

        let mut destination = factory(&self.services);
        destination.apply_query_attributes(&request.query);
        destination
            .initialize(Some(&request.query))
            .map_err(|source| NavigationError::Controller {
                route: request.path.clone(),
                source,
            })?;

        self.context.push(NavEntry {
            route: request.path.clone(),
            destination,
            presentation: self.presentation,
        });
        Ok(NavOutcome::Presented {
            route: request.path,
        })
    }

    /// Dispatch every route queued on the services' [`Navigator`], in order,
    /// including requests queued by the controllers being dispatched. Stops
    /// at the first failure.
    pub fn pump(&mut self) -> Result<Vec<NavOutcome>, NavigationError> {
        let mut outcomes = Vec::new();
        while let Some(route) = self.services.navigator.take() {
            outcomes.push(self.navigate(&route)?);
        }
        Ok(outcomes)
    }
}

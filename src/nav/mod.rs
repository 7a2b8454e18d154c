//! Navigation split across logical submodules.

mod route;
mod router;

pub use route::{Query, RouteRequest};
pub use router::{
    DestinationFactory, NavEntry, NavOutcome, NavigationContext, Navigator, Presentation,
    RouteTable, Router,
};

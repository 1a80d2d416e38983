//! Routes and the navigation collaborator.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The code gate.
    Entry,
    /// The monthly ledger.
    Home,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Home => "/home",
        }
    }
}

/// Host navigation. Every transition the crate requests replaces the
/// current screen; nothing is pushed onto a back stack.
pub trait Navigator {
    fn navigate_replacing(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate_replacing(&self, route: Route) {
        (**self).navigate_replacing(route)
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn navigate_replacing(&self, route: Route) {
        (**self).navigate_replacing(route)
    }
}

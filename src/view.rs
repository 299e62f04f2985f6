//! The app's views and its route table.

use std::fmt;
use crate::error::ConfigError;
use crate::router::{RouteDef, Router};

/// The views a route can dispatch to.
///
/// Views are opaque to the router; it only hands them the resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Programari,
    EditProgramare,
    Login,
    /// Rendered when nothing in the table matches.
    NotFound,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            View::Home => "HomeView",
            View::Programari => "ProgramariView",
            View::EditProgramare => "EditProgramareView",
            View::Login => "LoginView",
            View::NotFound => "NotFoundView",
        };
        write!(f, "{}", name)
    }
}

/// `(pattern, name, view)` for every route, in matching order.
pub const ROUTES: &[(&str, &str, View)] = &[
    ("/", "home", View::Home),
    ("/programari", "programari", View::Programari),
    ("/programari/:id/edit", "edit-programare", View::EditProgramare),
    ("/login", "login", View::Login),
];

/// Build the route table.
pub fn routes() -> Result<Router<View>, ConfigError> {
    let defs = ROUTES.iter()
        .map(|&(pattern, name, view)| RouteDef::new(pattern, name, view))
        .collect::<Result<Vec<_>, _>>()?;
    Router::new(defs)
}

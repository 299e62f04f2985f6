//! Client side of the programari scheduling app.
//!
//! The core of this crate is a small client side router. A fixed, ordered table of routes maps
//! url paths to views; paths resolve to the first matching route, dynamic segments (`:id`) are
//! extracted as parameters, and a [`Navigator`] keeps the navigation history and tells
//! subscribers whenever the current route changes.
//!
//! ```
//! use programari_web::{view, Navigator, View};
//!
//! let mut navigator = Navigator::new(view::routes().unwrap());
//! let route = navigator.navigate_to_path("/programari/42/edit").unwrap();
//! assert_eq!(*route.target(), View::EditProgramare);
//! assert_eq!(route.param("id"), Some("42"));
//! ```
//!
//! The [`app`] module attaches all of this to the browser: it resolves the initial url, keeps
//! the browser history in sync, and exports the entry points the page calls.
//!
//! [`Navigator`]: navigator/struct.Navigator.html
//! [`app`]: app/index.html

pub mod error;
pub mod pattern;
pub mod router;
pub mod history;
pub mod navigator;
pub mod notify;
pub mod config;
pub mod view;
pub mod browser;
pub mod app;

pub use crate::error::{ConfigError, RouteError};
pub use crate::pattern::Params;
pub use crate::router::{Resolved, Route, RouteDef, Router};
pub use crate::navigator::{Navigation, NavigationKind, Navigator};
pub use crate::notify::{Notice, Notifier};
pub use crate::view::View;

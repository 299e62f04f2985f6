//! Navigation state: the current route, its history, and the observers of route changes.
//!
//! All mutation goes through the navigation methods on [`Navigator`]. Each successful navigation
//! notifies subscribers synchronously, in the order they subscribed. Failed navigations and
//! back/forward at either end of the history change nothing and notify nobody.
//!
//! [`Navigator`]: struct.Navigator.html

use std::fmt;
use log::{debug, info};
use crate::error::RouteError;
use crate::history::History;
use crate::pattern::Params;
use crate::router::{Resolved, Router};

/// How the current route was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// A new entry was pushed onto the history.
    Push,
    /// One step back in the history.
    Back,
    /// One step forward in the history.
    Forward,
    /// A jump to an existing history position, e.g. from the browser's own back button.
    Restore,
}

/// What subscribers are told after a navigation.
#[derive(Debug)]
pub struct Navigation<'a, V> {
    pub route: &'a Resolved<V>,
    pub kind: NavigationKind,
    /// Position of `route` in the history.
    pub position: usize,
}

type Subscriber<V> = Box<dyn FnMut(&Navigation<V>)>;

/// Owns the route table and the navigation history.
pub struct Navigator<V> {
    router: Router<V>,
    history: History<Resolved<V>>,
    subscribers: Vec<Subscriber<V>>,
}

impl<V: fmt::Debug> fmt::Debug for Navigator<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("router", &self.router)
            .field("history", &self.history)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<V> Navigator<V> {
    /// Start with an empty history.
    pub fn new(router: Router<V>) -> Self {
        Navigator {
            router: router,
            history: History::default(),
            subscribers: vec![],
        }
    }

    pub fn router(&self) -> &Router<V> {
        &self.router
    }

    pub fn history(&self) -> &History<Resolved<V>> {
        &self.history
    }

    /// Observe route changes.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&Navigation<V>) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// The active route, `None` before the first navigation.
    pub fn current(&self) -> Option<&Resolved<V>> {
        self.history.current()
    }

    /// Resolve a path without navigating.
    pub fn resolve(&self, path: &str) -> Result<Resolved<V>, RouteError> {
        self.router.resolve(path)
    }

    /// Navigate to a named route.
    pub fn navigate_to(&mut self, name: &str, params: &Params) -> Result<&Resolved<V>, RouteError> {
        let resolved = self.router.resolve_named(name, params)?;
        Ok(self.push(resolved))
    }

    /// Navigate to a concrete path, e.g. from a link or the address bar.
    pub fn navigate_to_path(&mut self, path: &str) -> Result<&Resolved<V>, RouteError> {
        let resolved = self.router.resolve(path)?;
        Ok(self.push(resolved))
    }

    /// Go back one entry. Does nothing at the start of the history.
    pub fn back(&mut self) -> Option<&Resolved<V>> {
        self.history.back()?;
        self.commit(NavigationKind::Back)
    }

    /// Go forward one entry. Does nothing at the end of the history.
    pub fn forward(&mut self) -> Option<&Resolved<V>> {
        self.history.forward()?;
        self.commit(NavigationKind::Forward)
    }

    /// Jump to an existing history position.
    pub fn restore(&mut self, position: usize) -> Option<&Resolved<V>> {
        if position == self.history.position() && !self.history.is_empty() {
            return self.history.current();
        }
        self.history.go_to(position)?;
        self.commit(NavigationKind::Restore)
    }

    fn push(&mut self, resolved: Resolved<V>) -> &Resolved<V> {
        info!("navigating to {} ({})", resolved.path(), resolved.name());
        self.history.push(resolved);
        // push always leaves a current entry
        match self.commit(NavigationKind::Push) {
            Some(route) => route,
            None => unreachable!("history is empty after push"),
        }
    }

    fn commit(&mut self, kind: NavigationKind) -> Option<&Resolved<V>> {
        let Navigator {
            ref history,
            ref mut subscribers,
            ..
        } = *self;

        let route = history.current()?;
        debug!("{:?} to {} at position {}", kind, route.path(), history.position());

        let navigation = Navigation {
            route: route,
            kind: kind,
            position: history.position(),
        };
        for subscriber in subscribers.iter_mut() {
            subscriber(&navigation);
        }

        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::router::RouteDef;

    fn navigator() -> Navigator<&'static str> {
        let router = Router::new(vec![
            RouteDef::new("/", "home", "home-view").unwrap(),
            RouteDef::new("/items", "items", "items-view").unwrap(),
            RouteDef::new("/items/:id", "item", "item-view").unwrap(),
        ]).unwrap();
        Navigator::new(router)
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn current_path<V>(nav: &Navigator<V>) -> Option<&str> {
        nav.current().map(|r| r.path())
    }

    #[test]
    fn starts_empty() {
        let mut nav = navigator();
        assert!(nav.current().is_none());
        assert!(nav.back().is_none());
        assert!(nav.forward().is_none());
    }

    #[test]
    fn back_returns_to_previous() {
        let mut nav = navigator();
        nav.navigate_to_path("/items").unwrap();
        nav.navigate_to_path("/items/3").unwrap();

        nav.back();
        assert_eq!(nav.current(), nav.resolve("/items").ok().as_ref());

        nav.forward();
        assert_eq!(current_path(&nav), Some("/items/3"));
    }

    #[test]
    fn back_and_forward_at_edges_are_noops() {
        let mut nav = navigator();
        nav.navigate_to_path("/").unwrap();

        assert!(nav.back().is_none());
        assert!(nav.forward().is_none());
        assert_eq!(current_path(&nav), Some("/"));
    }

    #[test]
    fn navigate_by_name() {
        let mut nav = navigator();

        let route = nav.navigate_to("item", &params(&[("id", "9")])).unwrap();
        assert_eq!(route.path(), "/items/9");
        assert_eq!(route.param("id"), Some("9"));
    }

    #[test]
    fn failures_leave_state_alone() {
        let mut nav = navigator();
        nav.navigate_to_path("/items").unwrap();

        assert_eq!(
            nav.navigate_to("item", &Params::new()).unwrap_err(),
            RouteError::MissingParam { route: "item".to_owned(), param: "id".to_owned() }
        );
        assert!(nav.navigate_to_path("/nowhere").is_err());
        assert!(nav.navigate_to("nowhere", &Params::new()).is_err());

        assert_eq!(nav.history().len(), 1);
        assert_eq!(current_path(&nav), Some("/items"));
    }

    #[test]
    fn resolve_does_not_touch_history() {
        let nav = navigator();
        assert_eq!(nav.resolve("/items/1"), nav.resolve("/items/1"));
        assert!(nav.history().is_empty());
    }

    #[test]
    fn subscribers_notified_in_order() {
        let mut nav = navigator();
        let seen = Rc::new(RefCell::new(vec![]));

        for id in 0..3 {
            let seen = Rc::clone(&seen);
            nav.subscribe(move |n: &Navigation<&'static str>| {
                seen.borrow_mut().push((id, n.route.path().to_owned(), n.kind, n.position));
            });
        }

        nav.navigate_to_path("/items").unwrap();
        nav.navigate_to_path("/items/2").unwrap();
        nav.back();
        nav.back(); // no-op
        nav.navigate_to_path("/missing").unwrap_err();

        use NavigationKind::*;
        let expected: Vec<_> = vec![
            ("/items", Push, 0),
            ("/items/2", Push, 1),
            ("/items", Back, 0),
        ].into_iter()
            .flat_map(|(path, kind, pos)| (0..3).map(move |id| (id, path.to_owned(), kind, pos)))
            .collect();
        assert_eq!(*seen.borrow(), expected);
    }

    #[test]
    fn restore_position() {
        let mut nav = navigator();
        nav.navigate_to_path("/").unwrap();
        nav.navigate_to_path("/items").unwrap();
        nav.navigate_to_path("/items/1").unwrap();

        let kinds = Rc::new(RefCell::new(vec![]));
        {
            let kinds = Rc::clone(&kinds);
            nav.subscribe(move |n: &Navigation<&'static str>| kinds.borrow_mut().push(n.kind));
        }

        assert_eq!(nav.restore(0).map(|r| r.path()), Some("/"));
        assert!(nav.restore(7).is_none());
        // already there
        assert_eq!(nav.restore(0).map(|r| r.path()), Some("/"));
        assert_eq!(*kinds.borrow(), vec![NavigationKind::Restore]);
    }
}

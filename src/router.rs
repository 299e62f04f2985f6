//! The route table and path resolution.
//!
//! The table is an ordered list of [`RouteDef`]s built once at startup. Resolution walks the
//! table in declaration order and the first matching definition wins.
//!
//! [`RouteDef`]: struct.RouteDef.html

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use log::{debug, trace};
use crate::error::{ConfigError, RouteError};
use crate::pattern::{href, Location, Params, Pattern};

/// Implement this trait on a router to turn the page url into a message for the app.
pub trait Route<Message> {
    /// Convert a url to a message, `None` if the url isn't routable.
    fn route(&self, url: &str) -> Option<Message>;
}

/// A single entry in the route table.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteDef<V> {
    pattern: Pattern,
    name: String,
    target: V,
}

impl<V> RouteDef<V> {
    /// Declare a route, compiling its pattern.
    pub fn new(pattern: &str, name: &str, target: V) -> Result<Self, ConfigError> {
        Ok(RouteDef {
            pattern: Pattern::parse(pattern)?,
            name: name.to_owned(),
            target: target,
        })
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The unique name of this route.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The view this route dispatches to.
    pub fn target(&self) -> &V {
        &self.target
    }
}

/// The outcome of resolving a concrete path.
#[derive(Debug, PartialEq, Eq)]
pub struct Resolved<V> {
    route: Rc<RouteDef<V>>,
    path: String,
    params: Params,
    query: Params,
}

impl<V> Clone for Resolved<V> {
    fn clone(&self) -> Self {
        Resolved {
            route: Rc::clone(&self.route),
            path: self.path.clone(),
            params: self.params.clone(),
            query: self.query.clone(),
        }
    }
}

impl<V> Resolved<V> {
    /// The matched definition.
    pub fn route(&self) -> &RouteDef<V> {
        &self.route
    }

    /// Shorthand for the name of the matched definition.
    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// Shorthand for the target of the matched definition.
    pub fn target(&self) -> &V {
        self.route.target()
    }

    /// The normalized path that was resolved, without query or fragment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded values of the dynamic segments.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A single dynamic segment value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Decoded query string parameters.
    pub fn query(&self) -> &Params {
        &self.query
    }

    /// The path with the query string, suitable for the address bar.
    pub fn href(&self) -> String {
        href(&self.path, &self.query)
    }
}

/// An immutable, validated route table.
#[derive(Debug)]
pub struct Router<V> {
    routes: Vec<Rc<RouteDef<V>>>,
}

impl<V> Router<V> {
    /// Register the route table.
    ///
    /// Fails if two definitions share a name or two static patterns are identical.
    pub fn new<I>(defs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = RouteDef<V>>,
    {
        let mut names = HashSet::new();
        let mut statics: HashMap<String, String> = HashMap::new();
        let mut routes = vec![];

        for def in defs {
            if !names.insert(def.name.clone()) {
                return Err(ConfigError::DuplicateName(def.name));
            }

            if def.pattern.is_static() {
                let pattern = def.pattern.to_string();
                if let Some(first) = statics.get(&pattern) {
                    return Err(ConfigError::DuplicatePattern {
                        pattern: pattern,
                        first: first.clone(),
                        second: def.name,
                    });
                }
                statics.insert(pattern, def.name.clone());
            }

            trace!("registered route {} -> {}", def.name, def.pattern);
            routes.push(Rc::new(def));
        }

        debug!("route table built with {} routes", routes.len());
        Ok(Router { routes: routes })
    }

    /// Iterate over the table in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDef<V>> {
        self.routes.iter().map(|r| &**r)
    }

    fn find(&self, name: &str) -> Option<&Rc<RouteDef<V>>> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve a concrete path (optionally with a query string) to a route.
    ///
    /// The resolved path is rebuilt from the pattern and the decoded parameters, so it has the
    /// same form as one produced by [`resolve_named`].
    ///
    /// [`resolve_named`]: #method.resolve_named
    pub fn resolve(&self, path: &str) -> Result<Resolved<V>, RouteError> {
        let location = Location::parse(path);
        let components = location.components();

        for route in &self.routes {
            if let Some(params) = route.pattern.matches(&components) {
                trace!("{} resolved to {}", path, route.name);
                return Ok(Resolved {
                    route: Rc::clone(route),
                    path: route.pattern.expand(&route.name, &params)?,
                    params: params,
                    query: location.query_params(),
                });
            }
        }

        Err(RouteError::NotFound { path: path.to_owned() })
    }

    /// Build the concrete path for a named route.
    pub fn path_for(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        match self.find(name) {
            Some(route) => route.pattern.expand(name, params),
            None => Err(RouteError::UnknownRoute { name: name.to_owned() }),
        }
    }

    /// Resolve a named route directly, substituting the given parameters.
    ///
    /// Unlike resolving the built path, this always yields the named definition even when an
    /// earlier definition would also match the path. Parameters the pattern doesn't declare are
    /// dropped.
    pub fn resolve_named(&self, name: &str, params: &Params) -> Result<Resolved<V>, RouteError> {
        let route = self.find(name)
            .ok_or_else(|| RouteError::UnknownRoute { name: name.to_owned() })?;
        let path = route.pattern.expand(name, params)?;
        let params = route.pattern.params()
            .filter_map(|p| params.get_key_value(p))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Resolved {
            route: Rc::clone(route),
            path: path,
            params: params,
            query: Params::new(),
        })
    }
}

impl<V> Route<Resolved<V>> for Router<V> {
    fn route(&self, url: &str) -> Option<Resolved<V>> {
        self.resolve(url).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target { A, B, C }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn router(table: &[(&str, &str, Target)]) -> Result<Router<Target>, ConfigError> {
        let defs = table.iter()
            .map(|&(pattern, name, target)| RouteDef::new(pattern, name, target))
            .collect::<Result<Vec<_>, _>>()?;
        Router::new(defs)
    }

    #[test]
    fn duplicate_name() {
        let result = router(&[("/a", "x", Target::A), ("/b", "x", Target::B)]);
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateName("x".to_owned()));
    }

    #[test]
    fn duplicate_static_pattern() {
        let result = router(&[("/a", "x", Target::A), ("/a/", "y", Target::B)]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicatePattern {
                pattern: "/a".to_owned(),
                first: "x".to_owned(),
                second: "y".to_owned(),
            }
        );
    }

    #[test]
    fn identical_dynamic_patterns_allowed() {
        let router = router(&[("/p/:id", "x", Target::A), ("/p/:id", "y", Target::B)]).unwrap();
        assert_eq!(router.resolve("/p/1").unwrap().name(), "x");
    }

    #[test]
    fn first_match_wins() {
        let router = router(&[
            ("/p/:id", "dynamic", Target::A),
            ("/p/new", "static", Target::B),
            ("/q/new", "q-static", Target::C),
        ]).unwrap();

        let resolved = router.resolve("/p/new").unwrap();
        assert_eq!(resolved.name(), "dynamic");
        assert_eq!(resolved.params(), &params(&[("id", "new")]));
        assert_eq!(*router.resolve("/q/new").unwrap().target(), Target::C);
    }

    #[test]
    fn resolve_normalizes() {
        let router = router(&[("/a/:id", "x", Target::A)]).unwrap();

        let resolved = router.resolve("/a/1/?q=2#frag").unwrap();
        assert_eq!(resolved.path(), "/a/1");
        assert_eq!(resolved.param("id"), Some("1"));
        assert_eq!(resolved.query(), &params(&[("q", "2")]));
        assert_eq!(resolved.href(), "/a/1?q=2");

        assert_eq!(router.resolve("/A/1"), Err(RouteError::NotFound { path: "/A/1".to_owned() }));
        assert!(router.resolve("/a//").is_err());
    }

    #[test]
    fn resolve_is_pure() {
        let router = router(&[("/a/:id", "x", Target::A)]).unwrap();
        assert_eq!(router.resolve("/a/7"), router.resolve("/a/7"));
    }

    #[test]
    fn path_for() {
        let router = router(&[("/", "root", Target::A), ("/a/:id/b", "x", Target::B)]).unwrap();

        assert_eq!(router.path_for("root", &Params::new()), Ok("/".to_owned()));
        assert_eq!(router.path_for("x", &params(&[("id", "5")])), Ok("/a/5/b".to_owned()));
        assert_eq!(
            router.path_for("x", &Params::new()),
            Err(RouteError::MissingParam { route: "x".to_owned(), param: "id".to_owned() })
        );
        assert_eq!(
            router.path_for("nope", &Params::new()),
            Err(RouteError::UnknownRoute { name: "nope".to_owned() })
        );
    }

    #[test]
    fn resolve_named_ignores_shadowing() {
        let router = router(&[("/p/:id", "dynamic", Target::A), ("/p/new", "static", Target::B)]).unwrap();

        let resolved = router.resolve_named("static", &params(&[("unused", "1")])).unwrap();
        assert_eq!(resolved.name(), "static");
        assert_eq!(resolved.path(), "/p/new");
        assert!(resolved.params().is_empty());

        let resolved = router.resolve_named("dynamic", &params(&[("id", "a b"), ("x", "y")])).unwrap();
        assert_eq!(resolved.path(), "/p/a%20b");
        assert_eq!(resolved.params(), &params(&[("id", "a b")]));
        assert_eq!(router.resolve(resolved.path()).unwrap(), resolved);
    }

    #[test]
    fn resolved_path_has_one_form() {
        let router = router(&[("/p/:id/edit", "edit", Target::A)]).unwrap();
        let named = router.resolve_named("edit", &params(&[("id", "a b")])).unwrap();

        for path in &["/p/a b/edit", "/p/a%20b/edit", "/p/a%20b/edit/"] {
            let resolved = router.resolve(path).unwrap();
            assert_eq!(resolved.path(), "/p/a%20b/edit");
            assert_eq!(resolved, named);
        }
    }

    #[test]
    fn route_full_urls() {
        let router = router(&[("/", "root", Target::A), ("/login", "login", Target::B)]).unwrap();

        assert_eq!(router.route("http://localhost:8080").map(|r| *r.target()), Some(Target::A));
        assert_eq!(router.route("http://localhost:8080/").map(|r| *r.target()), Some(Target::A));
        assert_eq!(router.route("http://localhost:8080/login").map(|r| *r.target()), Some(Target::B));
        assert_eq!(router.route("http://localhost:8080/missing"), None);
    }
}

//! Attach the app to the page.
//!
//! The app is built once at startup: the route table is validated, the initial url is resolved,
//! and the navigator is wired to the browser history and the mount element. The functions at the
//! bottom of this module are the entry points exported to JavaScript.

use web_sys;
use wasm_bindgen::prelude::*;
use std::rc::Rc;
use std::cell::RefCell;
use cfg_if::cfg_if;
use log::{debug, info, warn};
use crate::browser;
use crate::config::{AppConfig, MOUNT_SELECTOR};
use crate::error::{ConfigError, RouteError};
use crate::navigator::{Navigation, Navigator};
use crate::notify::{Notice, Notifier};
use crate::pattern::Params;
use crate::view::{self, View};

cfg_if! {
    if #[cfg(feature = "console_error_panic_hook")] {
        #[inline]
        fn set_panic_hook() {
            console_error_panic_hook::set_once();
            debug!("panic hook set");
        }
    }
    else {
        fn set_panic_hook() {}
    }
}

cfg_if! {
    if #[cfg(feature = "console_log")] {
        #[inline]
        fn init_log() {
            // a second start() would fail here, the logger is already set
            if console_log::init_with_level(log::Level::Debug).is_ok() {
                debug!("log initialized");
            }
        }
    }
    else {
        fn init_log() {}
    }
}

/// Struct used to configure and attach the app to the DOM.
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: AppConfig,
    notifier: Notifier,
}

impl AppBuilder {
    /// Use a configuration other than the default one.
    pub fn config(self, config: AppConfig) -> Self {
        AppBuilder {
            config: config,
            ..self
        }
    }

    /// Use a custom message display callback.
    pub fn notifier(self, notifier: Notifier) -> Self {
        AppBuilder {
            notifier: notifier,
            ..self
        }
    }

    /// Attach the app to the dom.
    ///
    /// The route table is built, the current url is resolved and shown in `parent`, and a
    /// `popstate` listener is registered. Fails only if the route table is invalid.
    pub fn attach(self, parent: web_sys::Element) -> Result<App, ConfigError> {
        let AppBuilder {
            config,
            notifier,
        } = self;

        let mut navigator = Navigator::new(view::routes()?);

        let unresolved = browser::Unresolved::default();

        // show the initial url, replacing the browser entry so it carries our position
        let url = browser::current_url();
        match navigator.navigate_to_path(&url) {
            Ok(route) => {
                if let Err(e) = browser::replace_location(0, &route.href()) {
                    warn!("failed to record initial location: {:?}", e);
                }
                browser::show_view(&parent, *route.target());
            }
            Err(e) => {
                warn!("{}", e);
                browser::show_not_found(&parent, &unresolved, &browser::current_href());
            }
        }

        navigator.subscribe(browser::on_navigation);
        {
            let parent = parent.clone();
            let unresolved = Rc::clone(&unresolved);
            navigator.subscribe(move |navigation: &Navigation<View>| {
                unresolved.borrow_mut().take();
                browser::show_view(&parent, *navigation.route.target());
            });
        }

        let navigator = Rc::new(RefCell::new(navigator));
        let listener = browser::listen_popstate(
            Rc::clone(&navigator),
            parent.clone(),
            Rc::clone(&unresolved),
        );

        Ok(App {
            navigator: navigator,
            notifier: notifier,
            config: config,
            parent: parent,
            unresolved: unresolved,
            listener: Some(listener),
        })
    }
}

/// The running app.
pub struct App {
    navigator: Rc<RefCell<Navigator<View>>>,
    notifier: Notifier,
    config: AppConfig,
    parent: web_sys::Element,
    unresolved: browser::Unresolved,
    listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl App {
    /// Shared handle to the navigation state.
    ///
    /// Anything may read the current route through this handle, but navigation should go through
    /// the methods on `App` so failures are surfaced to the user.
    pub fn navigator(&self) -> &Rc<RefCell<Navigator<View>>> {
        &self.navigator
    }

    /// The message display capability handed to views.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The path being shown as not found, if any.
    ///
    /// While this is set the navigator's current route is the last one that resolved, not what
    /// is on screen.
    pub fn unresolved(&self) -> Option<String> {
        self.unresolved.borrow().clone()
    }

    /// What is on screen: the current route, or the path shown as not found.
    pub fn current_route(&self) -> serde_json::Value {
        if let Some(path) = self.unresolved() {
            return serde_json::json!({
                "name": null,
                "path": path,
                "view": View::NotFound.to_string(),
            });
        }

        match self.navigator.borrow().current() {
            Some(route) => serde_json::json!({
                "name": route.name(),
                "path": route.path(),
                "params": route.params(),
                "query": route.query(),
                "view": route.target().to_string(),
            }),
            None => serde_json::Value::Null,
        }
    }

    /// Navigate to a path, showing the not found view if it doesn't resolve.
    pub fn navigate(&self, path: &str) {
        let result = self.navigator.borrow_mut().navigate_to_path(path).map(|_| ());
        self.handle(result, path);
    }

    /// Navigate to a named route.
    pub fn navigate_named(&self, name: &str, params: &Params) {
        let result = self.navigator.borrow_mut().navigate_to(name, params).map(|_| ());
        self.handle(result, name);
    }

    pub fn back(&self) {
        self.navigator.borrow_mut().back();
    }

    pub fn forward(&self) {
        self.navigator.borrow_mut().forward();
    }

    fn handle(&self, result: Result<(), RouteError>, target: &str) {
        match result {
            Ok(()) => {}
            Err(e @ RouteError::NotFound { .. }) => {
                warn!("{}", e);
                browser::show_not_found(&self.parent, &self.unresolved, target);
            }
            // a view asked for a route it can't build
            Err(e) => self.notifier.report(&e),
        }
    }

    /// Detach the app from the dom.
    ///
    /// The `popstate` listener is removed. The navigation state stays readable.
    pub fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            browser::unlisten_popstate(&listener);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.detach();
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

fn with_app<T, F: FnOnce(&App) -> T>(f: F) -> Result<T, JsValue> {
    APP.with(|app| match *app.borrow() {
        Some(ref app) => Ok(f(app)),
        None => Err(JsValue::from_str("app not started")),
    })
}

/// Start the app in the `#app` element.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    init_log();
    set_panic_hook();

    if APP.with(|app| app.borrow().is_some()) {
        return Err(JsValue::from_str("app already started"));
    }

    let parent = web_sys::window()
        .expect_throw("couldn't get window handle")
        .document()
        .expect_throw("couldn't get document handle")
        .query_selector(MOUNT_SELECTOR)?
        .ok_or_else(|| JsValue::from_str("missing mount element"))?;

    let app = AppBuilder::default()
        .attach(parent)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    info!("programari started at {}", app.config().http.base_url);
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    Ok(())
}

/// Navigate to a path, e.g. from a link.
#[wasm_bindgen]
pub fn navigate(path: &str) -> Result<(), JsValue> {
    with_app(|app| app.navigate(path))
}

/// Navigate to a named route, with its parameters given as a JSON object of strings.
#[wasm_bindgen(js_name = navigateNamed)]
pub fn navigate_named(name: &str, params: &str) -> Result<(), JsValue> {
    let params: Params = serde_json::from_str(params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_app(|app| app.navigate_named(name, &params))
}

#[wasm_bindgen]
pub fn back() -> Result<(), JsValue> {
    with_app(App::back)
}

#[wasm_bindgen]
pub fn forward() -> Result<(), JsValue> {
    with_app(App::forward)
}

/// The shared message callback, taking a `{"type": ..., "text": ...}` JSON object.
#[wasm_bindgen(js_name = showMessage)]
pub fn show_message(message: &str) -> Result<(), JsValue> {
    let notice: Notice = serde_json::from_str(message)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_app(|app| app.notifier().show(&notice))
}

/// Request defaults for the HTTP client, as JSON.
#[wasm_bindgen(js_name = httpDefaults)]
pub fn http_defaults() -> Result<String, JsValue> {
    with_app(|app| serde_json::to_string(&app.config().http))?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Options for the calendar plugin, as JSON.
#[wasm_bindgen(js_name = calendarOptions)]
pub fn calendar_options() -> Result<String, JsValue> {
    with_app(|app| app.config().calendar.to_json())?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Name and path of what is on screen, as JSON.
#[wasm_bindgen(js_name = currentRoute)]
pub fn current_route() -> Result<JsValue, JsValue> {
    with_app(|app| match app.current_route() {
        serde_json::Value::Null => JsValue::NULL,
        json => JsValue::from_str(&json.to_string()),
    })
}

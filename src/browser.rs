//! Keep the browser's address bar and history in step with the navigator.
//!
//! Each browser history entry we create carries the navigator's history position as its state,
//! so a `popstate` from the browser's own back and forward buttons can be mapped back onto the
//! navigator with [`Navigator::restore`].
//!
//! [`Navigator::restore`]: ../navigator/struct.Navigator.html#method.restore

use web_sys;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use std::rc::Rc;
use std::cell::RefCell;
use log::{debug, warn};
use crate::navigator::{Navigation, NavigationKind, Navigator};
use crate::pattern::Location;
use crate::view::View;

fn window() -> web_sys::Window {
    web_sys::window().expect_throw("couldn't get window handle")
}

fn history() -> web_sys::History {
    window().history().expect_throw("couldn't get history handle")
}

/// The full url currently in the address bar.
pub fn current_url() -> String {
    window().location().href().expect_throw("couldn't get location")
}

/// Path and query currently in the address bar.
pub fn current_href() -> String {
    let location = window().location();
    let path = location.pathname().expect_throw("couldn't get pathname");
    let search = location.search().expect_throw("couldn't get search");
    path + &search
}

/// History position saved in a browser history entry, if it is one of ours.
pub fn position_from_state(state: &JsValue) -> Option<usize> {
    state.as_f64()
        .filter(|p| *p >= 0.0 && p.fract() == 0.0)
        .map(|p| p as usize)
}

/// Path of an address bar entry that didn't resolve and is showing the not found view.
///
/// Set when the not found view is shown, cleared by the next successful navigation.
pub type Unresolved = Rc<RefCell<Option<String>>>;

/// Record a navigator position in the browser history.
///
/// If the address bar already shows `href`, in any spelling that normalizes to it, the current
/// entry is replaced rather than adding a duplicate.
pub fn sync_location(position: usize, href: &str) -> Result<(), JsValue> {
    if Location::parse(&current_href()).canonical() == href {
        replace_location(position, href)
    }
    else {
        let state = JsValue::from_f64(position as f64);
        history().push_state_with_url(&state, "", Some(href))
    }
}

/// Overwrite the current browser entry with a navigator position and `href`.
pub fn replace_location(position: usize, href: &str) -> Result<(), JsValue> {
    let state = JsValue::from_f64(position as f64);
    history().replace_state_with_url(&state, "", Some(href))
}

/// Mirror a navigation into the browser.
///
/// Pushes become new browser entries. Back and forward made through the navigator are replayed
/// on the browser history; the resulting `popstate` lands on the position we are already at.
pub fn on_navigation(navigation: &Navigation<View>) {
    let result = match navigation.kind {
        NavigationKind::Push => sync_location(navigation.position, &navigation.route.href()),
        NavigationKind::Back => history().back(),
        NavigationKind::Forward => history().forward(),
        NavigationKind::Restore => Ok(()),
    };

    if let Err(e) = result {
        warn!("failed to update browser history: {:?}", e);
    }
}

/// Tag the mount element with the view that should be shown.
pub fn show_view(parent: &web_sys::Element, view: View) {
    debug!("showing {}", view);
    if let Err(e) = parent.set_attribute("data-view", &view.to_string()) {
        warn!("failed to set view on mount element: {:?}", e);
    }
}

/// Show the not found view for `path` and remember it.
pub fn show_not_found(parent: &web_sys::Element, unresolved: &Unresolved, path: &str) {
    *unresolved.borrow_mut() = Some(path.to_owned());
    show_view(parent, View::NotFound);
}

/// Listen for `popstate` and restore the navigator to the entry the browser moved to.
///
/// Entries without a saved position (e.g. a hand edited fragment) are resolved as a fresh path.
/// Entries that don't resolve show the not found view and are recorded in `unresolved`; the
/// navigator keeps its last route. The returned closure must be kept alive for as long as the
/// listener is registered.
pub fn listen_popstate(
    navigator: Rc<RefCell<Navigator<View>>>,
    parent: web_sys::Element,
    unresolved: Unresolved,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let closure = Closure::wrap(
        Box::new(move |event: web_sys::Event| {
            let state = event
                .dyn_ref::<web_sys::PopStateEvent>()
                .map(|e| e.state())
                .unwrap_or(JsValue::NULL);

            let mut navigator = navigator.borrow_mut();
            let found = match position_from_state(&state) {
                Some(position) => navigator.restore(position).is_some(),
                None => navigator.navigate_to_path(&current_url()).is_ok(),
            };

            if !found {
                show_not_found(&parent, &unresolved, &current_href());
            }
            // navigations are shown by the navigator's subscribers, but a restore to the
            // position we're already at notifies nobody
            else if unresolved.borrow_mut().take().is_some() {
                if let Some(route) = navigator.current() {
                    show_view(&parent, *route.target());
                }
            }
        }) as Box<dyn FnMut(web_sys::Event)>
    );

    window()
        .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        .expect_throw("failed to add popstate listener");

    closure
}

/// Remove a listener added by [`listen_popstate`].
///
/// [`listen_popstate`]: fn.listen_popstate.html
pub fn unlisten_popstate(closure: &Closure<dyn FnMut(web_sys::Event)>) {
    window()
        .remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        .expect_throw("failed to remove popstate listener");
}

//! The shared message-display capability.
//!
//! A single [`Notifier`] is created at startup and handed to every view. Views use it to surface
//! user facing messages; the default implementation writes them to the log.
//!
//! [`Notifier`]: struct.Notifier.html

use std::fmt;
use std::rc::Rc;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use crate::error::RouteError;

/// A user facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Kind of message, e.g. `success`, `warning`, `error`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Notice {
    pub fn new(kind: &str, text: &str) -> Self {
        Notice {
            kind: kind.to_owned(),
            text: text.to_owned(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.text)
    }
}

/// A cloneable handle to the message callback.
#[derive(Clone)]
pub struct Notifier {
    callback: Rc<dyn Fn(&Notice)>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Notifier(_)")
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(log_notice)
    }
}

impl Notifier {
    /// Wrap a callback.
    pub fn new<F: Fn(&Notice) + 'static>(callback: F) -> Self {
        Notifier {
            callback: Rc::new(callback),
        }
    }

    /// Display a message.
    pub fn show(&self, notice: &Notice) {
        (self.callback)(notice)
    }

    pub fn notify(&self, kind: &str, text: &str) {
        self.show(&Notice::new(kind, text))
    }

    /// Surface a recoverable routing error to the user.
    pub fn report(&self, err: &RouteError) {
        self.notify("error", &err.to_string())
    }
}

fn log_notice(notice: &Notice) {
    match notice.kind.as_str() {
        "error" => error!("{}", notice),
        "warning" => warn!("{}", notice),
        _ => info!("{}", notice),
    }
}

//! Process wide configuration fixed at startup.
//!
//! Views read the HTTP defaults when talking to the backend, and the calendar options are handed
//! to the calendar widget as its plugin options object.

use std::collections::BTreeMap;
use serde::Serialize;

/// Where the backend lives.
pub const API_BASE_URL: &str = "http://localhost:5000";

/// Element the app mounts into.
pub const MOUNT_SELECTOR: &str = "#app";

/// Defaults applied to every request the views make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpDefaults {
    pub base_url: String,
    /// Send cookies with cross origin requests.
    pub with_credentials: bool,
}

impl Default for HttpDefaults {
    fn default() -> Self {
        HttpDefaults {
            base_url: API_BASE_URL.to_owned(),
            with_credentials: true,
        }
    }
}

/// Display masks for one calendar locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLocale {
    pub masks: BTreeMap<String, String>,
}

/// Options for the calendar plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarOptions {
    pub locales: BTreeMap<String, CalendarLocale>,
}

impl Default for CalendarOptions {
    /// Romanian locale with day/month/year input dates.
    fn default() -> Self {
        let mut masks = BTreeMap::new();
        masks.insert("L".to_owned(), "DD/MM/YYYY".to_owned());

        let mut locales = BTreeMap::new();
        locales.insert("ro".to_owned(), CalendarLocale { masks: masks });

        CalendarOptions { locales: locales }
    }
}

impl CalendarOptions {
    /// The options as a JSON object for the widget.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Everything configured centrally at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub http: HttpDefaults,
    pub calendar: CalendarOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_defaults() {
        let http = HttpDefaults::default();
        assert_eq!(http.base_url, "http://localhost:5000");
        assert!(http.with_credentials);
        assert_eq!(
            serde_json::to_string(&http).unwrap(),
            r#"{"baseUrl":"http://localhost:5000","withCredentials":true}"#
        );
    }

    #[test]
    fn calendar_options_json() {
        assert_eq!(
            CalendarOptions::default().to_json().unwrap(),
            r#"{"locales":{"ro":{"masks":{"L":"DD/MM/YYYY"}}}}"#
        );
    }
}

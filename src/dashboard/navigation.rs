//! Navigation and Notifications
//!
//! The dashboard never renders pages itself. Click handlers resolve to a
//! [`Route`] that is handed to a [`Navigator`], and vessel details are
//! surfaced through a [`Notifier`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// In-app destinations reachable from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Forecast,
    Map,
    Alerts,
    Recommendations,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Forecast,
        Route::Map,
        Route::Alerts,
        Route::Recommendations,
    ];

    /// Path of the route in the front end
    pub fn path(&self) -> &'static str {
        match self {
            Route::Forecast => "/forecast",
            Route::Map => "/map",
            Route::Alerts => "/alerts",
            Route::Recommendations => "/recommendations",
        }
    }

    /// Join the route path onto a front-end base URL
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "forecast" => Ok(Route::Forecast),
            "map" => Ok(Route::Map),
            "alerts" => Ok(Route::Alerts),
            "recommendations" => Ok(Route::Recommendations),
            other => Err(format!("Unknown route: {}", other)),
        }
    }
}

/// Performs in-app route transitions
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Surfaces a modal-style message to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Navigator that only records the transition in the log
#[derive(Debug, Default, Clone)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigating");
    }
}

/// Notifier that writes messages to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

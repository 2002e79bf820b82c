//! Routes, navigation and asset requests
//!
//! Pages never navigate or download anything themselves. Calls to action
//! emit a [`SiteAction`] and the host decides what to do with it.

use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A page of the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    About,
    Contact,
    Platform,
    Partners,
    Resources,
    Solutions,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::About,
        Route::Contact,
        Route::Platform,
        Route::Partners,
        Route::Resources,
        Route::Solutions,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Platform => "/platform",
            Route::Partners => "/partners",
            Route::Resources => "/resources",
            Route::Solutions => "/solutions",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Contact => "contact",
            Route::Platform => "platform",
            Route::Partners => "partners",
            Route::Resources => "resources",
            Route::Solutions => "solutions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::Platform => "Platform",
            Route::Partners => "Partners",
            Route::Resources => "Resources",
            Route::Solutions => "Solutions",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = PageError;

    /// Accepts a path (`/about`) or a bare name (`about`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_start_matches('/').to_ascii_lowercase();
        if key.is_empty() {
            return Ok(Route::Home);
        }
        Route::ALL
            .into_iter()
            .find(|route| route.name() == key)
            .ok_or_else(|| PageError::UnknownPage(s.to_string()))
    }
}

/// A downloadable static asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLink {
    pub label: String,
    pub path: String,
}

impl AssetLink {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// A request a page hands to its host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SiteAction {
    /// Client-side route change
    Navigate { route: Route },
    /// Open or download a static asset
    Download { path: String },
}

impl SiteAction {
    pub fn navigate(route: Route) -> Self {
        SiteAction::Navigate { route }
    }

    pub fn download(path: impl Into<String>) -> Self {
        SiteAction::Download { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Home));
        assert_eq!("/Platform".parse::<Route>(), Ok(Route::Platform));
        assert_eq!("partners".parse::<Route>(), Ok(Route::Partners));
        assert!(matches!("/pricing".parse::<Route>(), Err(PageError::UnknownPage(_))));
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&SiteAction::navigate(Route::Contact)).unwrap();
        assert_eq!(json, r#"{"action":"navigate","route":"contact"}"#);
    }
}

//! Names under which the cookie surface is exposed on requests and responses.
//!
//! There are four roles, each with a default name:
//!
//! | role                | side     | default   |
//! |---------------------|----------|-----------|
//! | `req_get_cookie`    | request  | `cookies` |
//! | `unsign_cookie`     | request  | `unsign`  |
//! | `res_set_cookie`    | response | `cookie`  |
//! | `res_set_cookies`   | response | `cookies` |
//!
//! The names are resolved once at registration. A default name that has been
//! overridden no longer resolves to anything.

use serde::Deserialize;

pub const DEFAULT_REQ_GET_COOKIE: &str = "cookies";
pub const DEFAULT_UNSIGN_COOKIE: &str = "unsign";
pub const DEFAULT_RES_SET_COOKIE: &str = "cookie";
pub const DEFAULT_RES_SET_COOKIES: &str = "cookies";

/// User supplied replacements for the default names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoratorOverrides {
    pub req_get_cookie: Option<String>,
    pub unsign_cookie: Option<String>,
    pub res_set_cookie: Option<String>,
    pub res_set_cookies: Option<String>,
}

impl DecoratorOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn req_get_cookie(mut self, name: impl Into<String>) -> Self {
        self.req_get_cookie = Some(name.into());
        self
    }

    pub fn unsign_cookie(mut self, name: impl Into<String>) -> Self {
        self.unsign_cookie = Some(name.into());
        self
    }

    pub fn res_set_cookie(mut self, name: impl Into<String>) -> Self {
        self.res_set_cookie = Some(name.into());
        self
    }

    pub fn res_set_cookies(mut self, name: impl Into<String>) -> Self {
        self.res_set_cookies = Some(name.into());
        self
    }
}

/// A piece of state or behavior attached to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSurface {
    /// the parsed cookie mapping
    Cookies,
    /// the unsign helper
    Unsign,
}

/// A piece of behavior attached to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSurface {
    /// writes one cookie
    SetCookie,
    /// writes a mapping of cookies
    SetCookies,
}

/// The resolved names, fixed for the lifetime of the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorKeys {
    req_get_cookie: String,
    unsign_cookie: String,
    res_set_cookie: String,
    res_set_cookies: String,
}

impl Default for DecoratorKeys {
    fn default() -> Self {
        Self {
            req_get_cookie: DEFAULT_REQ_GET_COOKIE.to_owned(),
            unsign_cookie: DEFAULT_UNSIGN_COOKIE.to_owned(),
            res_set_cookie: DEFAULT_RES_SET_COOKIE.to_owned(),
            res_set_cookies: DEFAULT_RES_SET_COOKIES.to_owned(),
        }
    }
}

impl DecoratorKeys {
    /// Merges `overrides` over the default names.
    pub fn resolve(overrides: &DecoratorOverrides) -> Self {
        let defaults = Self::default();
        Self {
            req_get_cookie: overrides.req_get_cookie.clone().unwrap_or(defaults.req_get_cookie),
            unsign_cookie: overrides.unsign_cookie.clone().unwrap_or(defaults.unsign_cookie),
            res_set_cookie: overrides.res_set_cookie.clone().unwrap_or(defaults.res_set_cookie),
            res_set_cookies: overrides.res_set_cookies.clone().unwrap_or(defaults.res_set_cookies),
        }
    }

    pub fn req_get_cookie(&self) -> &str {
        &self.req_get_cookie
    }

    pub fn unsign_cookie(&self) -> &str {
        &self.unsign_cookie
    }

    pub fn res_set_cookie(&self) -> &str {
        &self.res_set_cookie
    }

    pub fn res_set_cookies(&self) -> &str {
        &self.res_set_cookies
    }

    /// Finds what is exposed on the request under `name`.
    ///
    /// The mapping wins over the helper when both roles share a name, the
    /// same way a later decoration replaces an earlier one.
    pub fn request_surface(&self, name: &str) -> Option<RequestSurface> {
        if name == self.req_get_cookie {
            Some(RequestSurface::Cookies)
        } else if name == self.unsign_cookie {
            Some(RequestSurface::Unsign)
        } else {
            None
        }
    }

    /// Finds what is exposed on the response under `name`.
    pub fn response_surface(&self, name: &str) -> Option<ResponseSurface> {
        if name == self.res_set_cookies {
            Some(ResponseSurface::SetCookies)
        } else if name == self.res_set_cookie {
            Some(ResponseSurface::SetCookie)
        } else {
            None
        }
    }
}

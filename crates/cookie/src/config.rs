//! Configuration accepted when registering the cookie plugin.
//!
//! The configuration is layered once at registration:
//! - built-in defaults (`HttpOnly` enabled, auto-unsign disabled)
//! - the user supplied [`CookieConfig`]
//!
//! After that it is read only. Options passed to a single write are merged on
//! top of the resolved defaults for that one call and never change them.
//!
//! The serde shape uses camelCase keys (`httpOnly`, `maxAge`, `sameSite`,
//! `parseOptions`, `decorator`), so the same configuration file can be shared
//! with Node services built on the `cookie` package.

use crate::error::ConfigError;
use crate::keys::DecoratorOverrides;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Value of the `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SameSite {
    #[serde(alias = "strict")]
    Strict,
    #[serde(alias = "lax")]
    Lax,
    #[serde(alias = "none")]
    None,
}

impl From<SameSite> for cookie::SameSite {
    fn from(same_site: SameSite) -> Self {
        match same_site {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

/// Turns a cookie value into the text placed after `name=` in `Set-Cookie`.
#[derive(Clone)]
pub struct Encoder(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Encoder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn encode(&self, value: &str) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Encoder(..)")
    }
}

/// Turns a raw cookie value taken from the `Cookie` header into the stored value.
///
/// Returning `None` keeps the raw value untouched.
#[derive(Clone)]
pub struct Decoder(Arc<dyn Fn(&str) -> Option<String> + Send + Sync>);

impl Decoder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn decode(&self, value: &str) -> Option<String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Decoder(..)")
    }
}

/// Attributes applied when serializing a cookie.
///
/// Every field is optional so that two layers can be merged with
/// [`CookieOptions::merge`]: an unset field falls through to the layer below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieOptions {
    pub domain: Option<String>,
    pub path: Option<String>,
    /// `Max-Age` in whole seconds.
    pub max_age: Option<i64>,
    pub expires: Option<SystemTime>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
    pub same_site: Option<SameSite>,
    pub partitioned: Option<bool>,
    /// Value encoder, percent-encoding when unset.
    #[serde(skip)]
    pub encode: Option<Encoder>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `overrides` on top of `self`, field by field.
    pub fn merge(&self, overrides: &CookieOptions) -> CookieOptions {
        CookieOptions {
            domain: overrides.domain.clone().or_else(|| self.domain.clone()),
            path: overrides.path.clone().or_else(|| self.path.clone()),
            max_age: overrides.max_age.or(self.max_age),
            expires: overrides.expires.or(self.expires),
            http_only: overrides.http_only.or(self.http_only),
            secure: overrides.secure.or(self.secure),
            same_site: overrides.same_site.or(self.same_site),
            partitioned: overrides.partitioned.or(self.partitioned),
            encode: overrides.encode.clone().or_else(|| self.encode.clone()),
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn expires(mut self, expires: SystemTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = Some(partitioned);
        self
    }

    pub fn encode(mut self, encoder: Encoder) -> Self {
        self.encode = Some(encoder);
        self
    }
}

/// Options forwarded to the `Cookie` header parser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Value decoder, percent-decoding when unset.
    #[serde(skip)]
    pub decode: Option<Decoder>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(mut self, decoder: Decoder) -> Self {
        self.decode = Some(decoder);
        self
    }
}

/// User facing configuration of the cookie plugin.
///
/// Any field left untouched keeps its built-in default, so
/// `CookieConfig::default()` and registering without a config behave the same.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieConfig {
    /// Signs every written cookie when present. Unsigns on read only with [`CookieConfig::unsign`].
    pub secret: Option<String>,
    /// Unsign every incoming cookie with `secret` before handlers see them.
    pub unsign: bool,
    #[serde(flatten)]
    pub defaults: CookieOptions,
    pub parse_options: ParseOptions,
    pub decorator: DecoratorOverrides,
}

impl CookieConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from its JSON form, unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn unsign(mut self, unsign: bool) -> Self {
        self.unsign = unsign;
        self
    }

    pub fn defaults(mut self, defaults: CookieOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn parse_options(mut self, parse_options: ParseOptions) -> Self {
        self.parse_options = parse_options;
        self
    }

    pub fn decorator(mut self, decorator: DecoratorOverrides) -> Self {
        self.decorator = decorator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_overrides() {
        let global = CookieOptions::new().http_only(true).path("/").domain("example.com");
        let call = CookieOptions::new().http_only(false).max_age(60);

        let merged = global.merge(&call);
        assert_eq!(merged.http_only, Some(false));
        assert_eq!(merged.path.as_deref(), Some("/"));
        assert_eq!(merged.domain.as_deref(), Some("example.com"));
        assert_eq!(merged.max_age, Some(60));
        assert_eq!(merged.secure, None);
    }

    #[test]
    fn merge_does_not_touch_the_base() {
        let global = CookieOptions::new().path("/");
        let _ = global.merge(&CookieOptions::new().path("/admin"));
        assert_eq!(global.path.as_deref(), Some("/"));
    }

    #[test]
    fn from_json_reads_camel_case_keys() {
        let config = CookieConfig::from_json(
            r#"{
                "secret": "key",
                "unsign": true,
                "httpOnly": false,
                "maxAge": 3600,
                "sameSite": "lax",
                "path": "/",
                "decorator": { "reqGetCookie": "jar" },
                "somethingElse": 1
            }"#,
        )
        .unwrap();

        assert_eq!(config.secret.as_deref(), Some("key"));
        assert!(config.unsign);
        assert_eq!(config.defaults.http_only, Some(false));
        assert_eq!(config.defaults.max_age, Some(3600));
        assert_eq!(config.defaults.same_site, Some(SameSite::Lax));
        assert_eq!(config.defaults.path.as_deref(), Some("/"));
        assert_eq!(config.decorator.req_get_cookie.as_deref(), Some("jar"));
    }

    #[test]
    fn from_json_empty_object_is_default() {
        let config = CookieConfig::from_json("{}").unwrap();
        assert_eq!(config.secret, None);
        assert!(!config.unsign);
        assert_eq!(config.defaults.http_only, None);
    }

    #[test]
    fn from_json_rejects_wrong_types() {
        let result = CookieConfig::from_json(r#"{ "unsign": "yes" }"#);
        assert!(matches!(result, Err(ConfigError::Json { .. })));
    }
}

//! Plugin registration and the request parse hook.
//!
//! [`CookiePlugin::register`] resolves the configuration once. The resulting
//! state is shared read only by every request and response it serves, so the
//! plugin can be cloned freely across tasks.

use crate::codec;
use crate::config::{CookieConfig, CookieOptions, ParseOptions};
use crate::keys::DecoratorKeys;
use crate::request::{CookieValue, RequestCookies};
use crate::response::ResponseCookies;
use crate::signature;
use http::HeaderMap;
use http::header::COOKIE;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Resolved configuration, immutable after registration.
#[derive(Debug)]
pub(crate) struct PluginState {
    secret: Option<String>,
    unsign: bool,
    defaults: CookieOptions,
    parse_options: ParseOptions,
    keys: DecoratorKeys,
}

impl PluginState {
    fn resolve(config: CookieConfig) -> Self {
        let builtin = CookieOptions::new().http_only(true);
        Self {
            secret: config.secret.filter(|secret| !secret.is_empty()),
            unsign: config.unsign,
            defaults: builtin.merge(&config.defaults),
            parse_options: config.parse_options,
            keys: DecoratorKeys::resolve(&config.decorator),
        }
    }

    #[inline]
    pub(crate) fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    #[inline]
    pub(crate) fn defaults(&self) -> &CookieOptions {
        &self.defaults
    }

    /// The secret used by the parse hook, only when auto-unsign is enabled.
    fn unsign_secret(&self) -> Option<&str> {
        if self.unsign { self.secret() } else { None }
    }
}

/// The registered cookie plugin.
#[derive(Debug, Clone)]
pub struct CookiePlugin {
    state: Arc<PluginState>,
}

impl CookiePlugin {
    /// Registers the plugin, `None` means all defaults.
    pub fn register(config: Option<CookieConfig>) -> Self {
        let state = PluginState::resolve(config.unwrap_or_default());
        debug!(
            req_get_cookie = state.keys.req_get_cookie(),
            unsign_cookie = state.keys.unsign_cookie(),
            res_set_cookie = state.keys.res_set_cookie(),
            res_set_cookies = state.keys.res_set_cookies(),
            signing = state.secret.is_some(),
            auto_unsign = state.unsign_secret().is_some(),
            "cookie plugin registered"
        );
        Self { state: Arc::new(state) }
    }

    /// The names under which the cookie surface is exposed.
    pub fn keys(&self) -> &DecoratorKeys {
        &self.state.keys
    }

    /// The resolved default serialization options.
    pub fn defaults(&self) -> &CookieOptions {
        self.state.defaults()
    }

    pub fn secret(&self) -> Option<&str> {
        self.state.secret()
    }

    /// Whether incoming cookies are unsigned before handlers see them.
    pub fn auto_unsign(&self) -> bool {
        self.state.unsign_secret().is_some()
    }

    /// The pre-handler hook: parses the `Cookie` header of a request.
    ///
    /// Without a `Cookie` header the mapping is empty. Several `Cookie`
    /// fields are joined with `"; "` before parsing. When auto-unsign is
    /// enabled every value is unsigned, failures are stored as
    /// [`CookieValue::InvalidSignature`].
    pub fn parse_request(&self, headers: &HeaderMap) -> RequestCookies {
        let Some(header) = cookie_header(headers) else {
            return RequestCookies::empty(Arc::clone(&self.state));
        };

        let parsed = codec::parse(&header, &self.state.parse_options);
        let cookies = match self.state.unsign_secret() {
            Some(secret) => parsed
                .into_iter()
                .map(|(name, value)| {
                    let value = CookieValue::from(signature::unsign(&value, secret));
                    (name, value)
                })
                .collect(),
            None => parsed.into_iter().map(|(name, value)| (name, CookieValue::Value(value))).collect(),
        };

        let cookies = RequestCookies::new(cookies, Arc::clone(&self.state));
        trace!(count = cookies.len(), "parsed request cookies");
        cookies
    }

    /// A fresh `Set-Cookie` accumulator for one response.
    pub fn response(&self) -> ResponseCookies {
        ResponseCookies::new(Arc::clone(&self.state))
    }
}

/// Joins every utf-8 `Cookie` field, `None` when there is nothing to parse.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let mut joined: Option<String> = None;

    for value in headers.get_all(COOKIE) {
        let value = match value.to_str() {
            Ok(value) => value,
            Err(e) => {
                warn!(cause = %e, "skip non utf-8 cookie header");
                continue;
            }
        };
        if value.is_empty() {
            continue;
        }

        match joined.as_mut() {
            Some(joined) => {
                joined.push_str("; ");
                joined.push_str(value);
            }
            None => joined = Some(value.to_owned()),
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::DecoratorOverrides;
    use http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_defaults() {
        let plugin = CookiePlugin::register(None);
        assert_eq!(plugin.defaults().http_only, Some(true));
        assert_eq!(plugin.secret(), None);
        assert!(!plugin.auto_unsign());
        assert_eq!(plugin.keys(), &DecoratorKeys::default());
    }

    #[test]
    fn test_user_options_override_builtin() {
        let config = CookieConfig::new().defaults(CookieOptions::new().http_only(false).path("/"));
        let plugin = CookiePlugin::register(Some(config));
        assert_eq!(plugin.defaults().http_only, Some(false));
        assert_eq!(plugin.defaults().path.as_deref(), Some("/"));
    }

    #[test]
    fn test_empty_secret_is_absent() {
        let plugin = CookiePlugin::register(Some(CookieConfig::new().secret("").unsign(true)));
        assert_eq!(plugin.secret(), None);
        assert!(!plugin.auto_unsign());
    }

    #[test]
    fn test_headerless_request_is_empty() {
        let plugin = CookiePlugin::register(None);
        let cookies = plugin.parse_request(&HeaderMap::new());
        assert!(cookies.is_empty());
    }

    #[test]
    fn test_requests_do_not_share_cookies() {
        let plugin = CookiePlugin::register(None);
        let first = plugin.parse_request(&headers(&["foo=bar"]));
        let second = plugin.parse_request(&HeaderMap::new());
        assert_eq!(first.get_str("foo"), Some("bar"));
        assert!(second.is_empty());
    }

    #[test]
    fn test_multiple_cookie_fields_are_joined() {
        let plugin = CookiePlugin::register(None);
        let cookies = plugin.parse_request(&headers(&["a=1", "b=2"]));
        assert_eq!(cookies.get_str("a"), Some("1"));
        assert_eq!(cookies.get_str("b"), Some("2"));
    }

    #[test]
    fn test_non_utf8_field_is_skipped() {
        let plugin = CookiePlugin::register(None);
        let mut map = headers(&["a=1"]);
        map.append(COOKIE, HeaderValue::from_bytes(b"b=\xff").unwrap());
        let cookies = plugin.parse_request(&map);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get_str("a"), Some("1"));
    }

    #[test]
    fn test_auto_unsign() {
        let plugin = CookiePlugin::register(Some(CookieConfig::new().secret("key").unsign(true)));
        let signed = urlencoding::encode(&signature::sign("bar", "key")).into_owned();
        let cookies = plugin.parse_request(&headers(&[format!("foo={signed}; plain=value").as_str()]));

        assert_eq!(cookies.get_str("foo"), Some("bar"));
        assert_eq!(cookies.get("plain"), Some(&CookieValue::InvalidSignature));
    }

    #[test]
    fn test_secret_without_unsign_keeps_raw_values() {
        let plugin = CookiePlugin::register(Some(CookieConfig::new().secret("key")));
        let signed = signature::sign("bar", "key");
        let header = format!("foo={}", urlencoding::encode(&signed));
        let cookies = plugin.parse_request(&headers(&[header.as_str()]));

        assert_eq!(cookies.get_str("foo"), Some(signed.as_str()));
    }

    #[test]
    fn test_unsign_without_secret_is_noop() {
        let plugin = CookiePlugin::register(Some(CookieConfig::new().unsign(true)));
        let cookies = plugin.parse_request(&headers(&["foo=bar"]));
        assert_eq!(cookies.get_str("foo"), Some("bar"));
    }

    #[test]
    fn test_custom_keys() {
        let overrides = DecoratorOverrides::new().req_get_cookie("jar");
        let plugin = CookiePlugin::register(Some(CookieConfig::new().decorator(overrides)));
        assert_eq!(plugin.keys().req_get_cookie(), "jar");
    }
}

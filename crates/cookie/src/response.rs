//! Response side cookie writer.
//!
//! Every write serializes one cookie into its own `Set-Cookie` line. Lines are
//! kept in call order and cookies sharing a name are never merged, so writing
//! `foo` twice produces two lines.

use crate::codec;
use crate::config::CookieOptions;
use crate::error::CookieError;
use crate::plugin::PluginState;
use crate::signature;
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use std::borrow::Cow;
use std::slice;
use std::sync::Arc;
use tracing::trace;

/// Accumulated `Set-Cookie` value: a single line until a second one is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetCookieHeader {
    Single(HeaderValue),
    Multiple(Vec<HeaderValue>),
}

impl SetCookieHeader {
    /// All lines in write order.
    pub fn lines(&self) -> &[HeaderValue] {
        match self {
            SetCookieHeader::Single(line) => slice::from_ref(line),
            SetCookieHeader::Multiple(lines) => lines,
        }
    }

    fn push(self, line: HeaderValue) -> Self {
        match self {
            SetCookieHeader::Single(first) => SetCookieHeader::Multiple(vec![first, line]),
            SetCookieHeader::Multiple(mut lines) => {
                lines.push(line);
                SetCookieHeader::Multiple(lines)
            }
        }
    }
}

/// One value, or several values written under the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieValues {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for CookieValues {
    fn from(value: &str) -> Self {
        CookieValues::One(value.to_owned())
    }
}

impl From<String> for CookieValues {
    fn from(value: String) -> Self {
        CookieValues::One(value)
    }
}

impl From<Vec<String>> for CookieValues {
    fn from(values: Vec<String>) -> Self {
        CookieValues::Many(values)
    }
}

impl From<Vec<&str>> for CookieValues {
    fn from(values: Vec<&str>) -> Self {
        CookieValues::Many(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CookieValues {
    fn from(values: [&str; N]) -> Self {
        CookieValues::Many(values.into_iter().map(str::to_owned).collect())
    }
}

/// Collects the `Set-Cookie` lines of one response.
#[derive(Debug, Clone)]
pub struct ResponseCookies {
    header: Option<SetCookieHeader>,
    state: Arc<PluginState>,
}

impl ResponseCookies {
    pub(crate) fn new(state: Arc<PluginState>) -> Self {
        Self { header: None, state }
    }

    /// Writes one cookie.
    ///
    /// `options` are merged over the configured defaults for this call only.
    /// When a secret is configured the value is signed first.
    ///
    /// On error nothing is written.
    pub fn cookie(
        &mut self,
        name: &str,
        value: impl AsRef<str>,
        options: Option<&CookieOptions>,
    ) -> Result<&mut Self, CookieError> {
        let merged;
        let options = match options {
            Some(options) => {
                merged = self.state.defaults().merge(options);
                &merged
            }
            None => self.state.defaults(),
        };

        let value = match self.state.secret() {
            Some(secret) => Cow::Owned(signature::sign(value.as_ref(), secret)),
            None => Cow::Borrowed(value.as_ref()),
        };

        let line = codec::serialize(name, &value, options)?;
        let line = HeaderValue::try_from(line)?;
        trace!(cookie = name, "write set-cookie line");

        self.header = Some(match self.header.take() {
            Some(header) => header.push(line),
            None => SetCookieHeader::Single(line),
        });
        Ok(self)
    }

    /// Writes every entry of `cookies` in iteration order.
    ///
    /// A [`CookieValues::Many`] entry writes one line per value, in order.
    /// All writes share `options`. Lines written before a failing entry are kept.
    pub fn cookies<I, K, V>(&mut self, cookies: I, options: Option<&CookieOptions>) -> Result<&mut Self, CookieError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CookieValues>,
    {
        for (name, values) in cookies {
            match values.into() {
                CookieValues::One(value) => {
                    self.cookie(name.as_ref(), value, options)?;
                }
                CookieValues::Many(values) => {
                    for value in values {
                        self.cookie(name.as_ref(), value, options)?;
                    }
                }
            }
        }
        Ok(self)
    }

    pub fn header(&self) -> Option<&SetCookieHeader> {
        self.header.as_ref()
    }

    /// All written lines in write order.
    pub fn lines(&self) -> &[HeaderValue] {
        match &self.header {
            Some(header) => header.lines(),
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none()
    }

    /// Moves the written lines onto `headers`, one `Set-Cookie` field per line,
    /// after any `Set-Cookie` fields already present.
    pub fn write_to(&mut self, headers: &mut HeaderMap) {
        let Some(header) = self.header.take() else {
            return;
        };

        match header {
            SetCookieHeader::Single(line) => {
                headers.append(SET_COOKIE, line);
            }
            SetCookieHeader::Multiple(lines) => {
                for line in lines {
                    headers.append(SET_COOKIE, line);
                }
            }
        }
    }
}

//! Request side cookie state.
//!
//! [`RequestCookies`] is created fresh for every request by the parse hook
//! and owned by that request only.

use crate::error::UnsignError;
use crate::plugin::PluginState;
use crate::signature;
use indexmap::IndexMap;
use std::sync::Arc;

/// A value in the request cookie mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieValue {
    /// The value as received, or its plaintext once unsigned.
    Value(String),
    /// Signature verification failed for this cookie.
    InvalidSignature,
}

impl CookieValue {
    /// The value, or `None` when the signature was invalid.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CookieValue::Value(value) => Some(value),
            CookieValue::InvalidSignature => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CookieValue::Value(_))
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            CookieValue::Value(value) => Some(value),
            CookieValue::InvalidSignature => None,
        }
    }
}

impl<E> From<Result<String, E>> for CookieValue {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(value) => CookieValue::Value(value),
            Err(_) => CookieValue::InvalidSignature,
        }
    }
}

impl PartialEq<&str> for CookieValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// The cookies of one request, keyed by name in header order.
#[derive(Debug, Clone)]
pub struct RequestCookies {
    cookies: IndexMap<String, CookieValue>,
    state: Arc<PluginState>,
}

impl RequestCookies {
    pub(crate) fn new(cookies: IndexMap<String, CookieValue>, state: Arc<PluginState>) -> Self {
        Self { cookies, state }
    }

    pub(crate) fn empty(state: Arc<PluginState>) -> Self {
        Self::new(IndexMap::new(), state)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&CookieValue> {
        self.cookies.get(name)
    }

    /// Gets the value of `name`, `None` when absent or when its signature was invalid.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).and_then(CookieValue::as_str)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CookieValue)> {
        self.cookies.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Unsigns the cookie `name` with `secret`, or the configured secret when `None`.
    ///
    /// The stored entry is overwritten with the outcome: the plaintext on
    /// success, [`CookieValue::InvalidSignature`] on a failed verification.
    /// Unsigning the same cookie twice will normally fail the second time
    /// since a plaintext does not carry a signature.
    ///
    /// Nothing is stored when there is no secret at all or when the cookie is
    /// absent.
    pub fn unsign(&mut self, name: &str, secret: Option<&str>) -> Result<String, UnsignError> {
        let secret = secret
            .filter(|secret| !secret.is_empty())
            .or(self.state.secret())
            .ok_or(UnsignError::MissingSecret)?;

        let entry = self.cookies.get_mut(name).ok_or_else(|| UnsignError::not_found(name))?;
        let signed = match &*entry {
            CookieValue::Value(signed) => signed,
            CookieValue::InvalidSignature => return Err(UnsignError::invalid(name)),
        };

        let result = signature::unsign(signed, secret);
        *entry = CookieValue::from(result.clone());
        result
    }
}

impl<'a> IntoIterator for &'a RequestCookies {
    type Item = (&'a String, &'a CookieValue);
    type IntoIter = indexmap::map::Iter<'a, String, CookieValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.iter()
    }
}

use thiserror::Error;

/// Errors raised while turning a name, a value and its attributes into a `Set-Cookie` line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("invalid cookie name: {name:?}")]
    InvalidName { name: String },

    #[error("invalid value for cookie {name:?}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("invalid domain attribute: {domain:?}")]
    InvalidDomain { domain: String },

    #[error("invalid path attribute: {path:?}")]
    InvalidPath { path: String },

    #[error("expires attribute is outside the representable date range")]
    InvalidExpires,

    #[error("invalid set-cookie header value: {reason}")]
    InvalidHeaderValue { reason: String },
}

impl From<http::header::InvalidHeaderValue> for CookieError {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue { reason: e.to_string() }
    }
}

impl CookieError {
    pub fn invalid_name<S: ToString>(name: S) -> Self {
        Self::InvalidName { name: name.to_string() }
    }

    pub fn invalid_value<N: ToString, R: ToString>(name: N, reason: R) -> Self {
        Self::InvalidValue { name: name.to_string(), reason: reason.to_string() }
    }

    pub fn invalid_domain<S: ToString>(domain: S) -> Self {
        Self::InvalidDomain { domain: domain.to_string() }
    }

    pub fn invalid_path<S: ToString>(path: S) -> Self {
        Self::InvalidPath { path: path.to_string() }
    }
}

/// Reasons a signed cookie could not be verified.
///
/// These are returned as data and never panic: a failed verification is an
/// ordinary outcome the handler has to check for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsignError {
    #[error("no secret configured to unsign with")]
    MissingSecret,

    #[error("signed value has no signature separator")]
    Malformed,

    #[error("signature does not match")]
    Mismatch,

    #[error("cookie {name:?} is not present on the request")]
    NotFound { name: String },

    #[error("cookie {name:?} already failed signature verification")]
    Invalid { name: String },
}

impl UnsignError {
    pub fn not_found<S: ToString>(name: S) -> Self {
        Self::NotFound { name: name.to_string() }
    }

    pub fn invalid<S: ToString>(name: S) -> Self {
        Self::Invalid { name: name.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid cookie configuration: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

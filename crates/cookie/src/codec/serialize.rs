use crate::config::CookieOptions;
use crate::error::CookieError;
use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use std::time::SystemTime;

/// Serializes `name=value` and the attributes in `options` into one `Set-Cookie` line.
///
/// The value is passed through the configured encoder before validation. The
/// default percent-encodes everything but ASCII alphanumerics and `-._~`. Attributes that are unset, or boolean
/// attributes set to `false`, are left out.
pub fn serialize(name: &str, value: &str, options: &CookieOptions) -> Result<String, CookieError> {
    if !is_token(name) {
        return Err(CookieError::invalid_name(name));
    }

    let encoded = match &options.encode {
        Some(encoder) => encoder.encode(value),
        None => urlencoding::encode(value).into_owned(),
    };
    if !is_cookie_text(&encoded) {
        return Err(CookieError::invalid_value(name, "encoded value contains a control character or ';'"));
    }

    let mut builder = Cookie::build((name.to_owned(), encoded));

    if let Some(domain) = &options.domain {
        if !is_cookie_text(domain) {
            return Err(CookieError::invalid_domain(domain));
        }
        builder = builder.domain(domain.clone());
    }

    if let Some(path) = &options.path {
        if !is_cookie_text(path) {
            return Err(CookieError::invalid_path(path));
        }
        builder = builder.path(path.clone());
    }

    if let Some(max_age) = options.max_age {
        builder = builder.max_age(Duration::seconds(max_age));
    }

    if let Some(expires) = options.expires {
        let expires = expires_at(expires).ok_or(CookieError::InvalidExpires)?;
        builder = builder.expires(expires);
    }

    if let Some(http_only) = options.http_only {
        builder = builder.http_only(http_only);
    }

    if let Some(secure) = options.secure {
        builder = builder.secure(secure);
    }

    if let Some(same_site) = options.same_site {
        builder = builder.same_site(cookie::SameSite::from(same_site));
    }

    if let Some(partitioned) = options.partitioned {
        builder = builder.partitioned(partitioned);
    }

    Ok(builder.build().to_string())
}

/// `None` when `time` cannot represent the instant.
fn expires_at(expires: SystemTime) -> Option<OffsetDateTime> {
    match expires.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => OffsetDateTime::UNIX_EPOCH.checked_add(Duration::try_from(after).ok()?),
        Err(e) => OffsetDateTime::UNIX_EPOCH.checked_sub(Duration::try_from(e.duration()).ok()?),
    }
}

/// RFC 7230 `token`
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

fn is_cookie_text(s: &str) -> bool {
    s.chars().all(|c| !c.is_control() && c != ';')
}

//! HMAC-SHA256 cookie signatures.
//!
//! A signed value has the form `value.signature` where `signature` is the
//! standard base64 encoding of `HMAC-SHA256(secret, value)` with the trailing
//! `=` padding removed. This is the format produced by the `cookie-signature`
//! npm package, so cookies can be shared with services that use it.

use crate::error::UnsignError;
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// Appends the signature of `value` under `secret`.
pub fn sign(value: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(value.as_bytes());
    let signature = STANDARD_NO_PAD.encode(mac.finalize().into_bytes());

    let mut signed = String::with_capacity(value.len() + 1 + signature.len());
    signed.push_str(value);
    signed.push(SEPARATOR);
    signed.push_str(&signature);
    signed
}

/// Verifies `input` against `secret` and strips the signature.
pub fn unsign(input: &str, secret: &str) -> Result<String, UnsignError> {
    let (value, _signature) = input.rsplit_once(SEPARATOR).ok_or(UnsignError::Malformed)?;
    let expected = sign(value, secret);

    // slices of different length compare unequal
    if bool::from(expected.as_bytes().ct_eq(input.as_bytes())) {
        Ok(value.to_owned())
    } else {
        Err(UnsignError::Mismatch)
    }
}

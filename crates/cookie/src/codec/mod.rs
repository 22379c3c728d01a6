//! Cookie grammar: reading the `Cookie` request header and writing `Set-Cookie` lines.
//!
//! Both directions delegate the grammar itself to the [`cookie`] crate, this
//! module only adds the value encoding and the validation rules on top.

mod parse;
mod serialize;

pub use parse::parse;
pub use serialize::serialize;

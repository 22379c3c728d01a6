//! Cookie support for async services built on the `http` crate.
//!
//! The plugin parses the `Cookie` header of every request before its handler
//! runs, can verify HMAC signatures on the way in, and writes any number of
//! `Set-Cookie` lines on the way out, signing them when a secret is
//! configured.
//!
//! The crate brings its own small handler seam over plain `http` types:
//! [`RequestHandler`] takes a `Request<B>` and returns a `Response`. It is not
//! the `micro-web` handler trait, so a host built on `micro-web` wraps the
//! decorated handler in an adapter of its own.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use http::{Request, Response};
//! use micro_cookie::{CookieConfig, CookieContext, CookieHandler, CookiePlugin, HandlerDecorator, RequestHandler};
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl CookieHandler<()> for Hello {
//!     type Body = String;
//!
//!     async fn invoke(&self, _req: Request<()>, cookies: &mut CookieContext) -> Response<String> {
//!         let name = cookies.request.get_str("name").unwrap_or("world").to_owned();
//!         cookies.response.cookie("visited", "yes", None).expect("valid cookie");
//!         Response::new(format!("hello {name}"))
//!     }
//! }
//!
//! # block_on(async {
//! let plugin = CookiePlugin::register(Some(CookieConfig::new().secret("key")));
//! let handler = plugin.decorator().decorate(Hello);
//!
//! let req = Request::builder().header("cookie", "name=zava").body(()).unwrap();
//! let resp = handler.invoke(req).await;
//! assert_eq!(resp.body(), "hello zava");
//! assert!(resp.headers().get("set-cookie").is_some());
//! # });
//! # fn block_on<F: std::future::Future<Output = ()>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod codec;
mod config;
mod decorator;
mod error;
mod handler;
mod keys;
mod plugin;
mod request;
mod response;

pub mod signature;

pub use codec::{parse, serialize};
pub use config::{CookieConfig, CookieOptions, Decoder, Encoder, ParseOptions, SameSite};
pub use decorator::{CookieDecorator, CookieRequestHandler, HandlerDecorator};
pub use error::{ConfigError, CookieError, UnsignError};
pub use handler::{CookieContext, CookieHandler, RequestHandler};
pub use keys::{DecoratorKeys, DecoratorOverrides, RequestSurface, ResponseSurface};
pub use plugin::CookiePlugin;
pub use request::{CookieValue, RequestCookies};
pub use response::{CookieValues, ResponseCookies, SetCookieHeader};

//! Handler traits at the seam with the host framework.
//!
//! [`RequestHandler`] is the shape the framework dispatches to. Handlers that
//! read or write cookies implement [`CookieHandler`] instead and get an
//! explicit [`CookieContext`]; the [`CookieDecorator`](crate::CookieDecorator)
//! turns one into the other.

use crate::request::RequestCookies;
use crate::response::ResponseCookies;
use async_trait::async_trait;
use http::{Request, Response};

#[async_trait]
pub trait RequestHandler<B: Send + 'static>: Send + Sync {
    type Body;

    async fn invoke(&self, req: Request<B>) -> Response<Self::Body>;
}

/// A handler that receives the cookie state of its request and response.
#[async_trait]
pub trait CookieHandler<B: Send + 'static>: Send + Sync {
    type Body;

    async fn invoke(&self, req: Request<B>, cookies: &mut CookieContext) -> Response<Self::Body>;
}

/// Cookie state of one request/response pair.
#[derive(Debug)]
pub struct CookieContext {
    /// cookies parsed from the request, filled before the handler runs
    pub request: RequestCookies,
    /// `Set-Cookie` lines written by the handler, flushed after it returns
    pub response: ResponseCookies,
}

impl CookieContext {
    pub fn new(request: RequestCookies, response: ResponseCookies) -> Self {
        Self { request, response }
    }
}

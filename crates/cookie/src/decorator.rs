//! Decorates a [`CookieHandler`] with the cookie plugin.
//!
//! The decorated handler runs the parse hook before the inner handler and
//! moves every `Set-Cookie` line it wrote onto the response afterwards.

use crate::handler::{CookieContext, CookieHandler, RequestHandler};
use crate::plugin::CookiePlugin;
use async_trait::async_trait;
use http::{Request, Response};
use tracing::trace;

/// Wraps a handler into another one.
pub trait HandlerDecorator<In> {
    type Output;

    fn decorate(&self, handler: In) -> Self::Output;
}

#[derive(Debug, Clone)]
pub struct CookieDecorator {
    plugin: CookiePlugin,
}

impl CookieDecorator {
    pub fn new(plugin: CookiePlugin) -> Self {
        Self { plugin }
    }
}

/// A [`RequestHandler`] produced by [`CookieDecorator`].
#[derive(Debug)]
pub struct CookieRequestHandler<H> {
    handler: H,
    plugin: CookiePlugin,
}

impl<H> HandlerDecorator<H> for CookieDecorator {
    type Output = CookieRequestHandler<H>;

    fn decorate(&self, handler: H) -> Self::Output {
        CookieRequestHandler { handler, plugin: self.plugin.clone() }
    }
}

#[async_trait]
impl<B, H> RequestHandler<B> for CookieRequestHandler<H>
where
    B: Send + 'static,
    H: CookieHandler<B>,
{
    type Body = H::Body;

    async fn invoke(&self, req: Request<B>) -> Response<Self::Body> {
        let request = self.plugin.parse_request(req.headers());
        let mut cookies = CookieContext::new(request, self.plugin.response());

        let mut resp = self.handler.invoke(req, &mut cookies).await;

        trace!(count = cookies.response.len(), "flush set-cookie lines");
        cookies.response.write_to(resp.headers_mut());
        resp
    }
}

impl CookiePlugin {
    /// A decorator that installs this plugin around handlers.
    pub fn decorator(&self) -> CookieDecorator {
        CookieDecorator::new(self.clone())
    }
}

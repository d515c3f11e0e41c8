use crate::http::header;
use axum::http::header::{HeaderName, InvalidHeaderName};
use axum::response::Response;
use axum::{extract::Request, http::HeaderValue};
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{error, info, info_span, trace, Instrument};

/// Identifier issued for one inbound request, available as a request extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait RequestIdGenerator: Send + Sync {
    /// `None` lets the request through without an id.
    fn generate(&self, request: &Request) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIdGenerator;

impl RequestIdGenerator for UuidRequestIdGenerator {
    fn generate(&self, _request: &Request) -> Option<String> {
        Some(uuid::Uuid::new_v4().to_string())
    }
}

#[derive(Clone)]
pub struct MLayer {
    request_header: Option<HeaderName>,
    response_header: Option<HeaderName>,
    generator: Arc<dyn RequestIdGenerator>,
}

pub fn new() -> MLayer {
    MLayer {
        request_header: Some(HeaderName::from_static(header::X_REQUEST_ID)),
        response_header: Some(HeaderName::from_static(header::REQUEST_ID)),
        generator: Arc::new(UuidRequestIdGenerator),
    }
}

impl MLayer {
    /// Header set on the forwarded request, `None` to skip.
    pub fn request_header(mut self, name: Option<&str>) -> Result<Self, InvalidHeaderName> {
        self.request_header = name.map(|n| HeaderName::from_bytes(n.as_bytes())).transpose()?;
        Ok(self)
    }

    /// Header set on the response, `None` to skip.
    pub fn response_header(mut self, name: Option<&str>) -> Result<Self, InvalidHeaderName> {
        self.response_header = name.map(|n| HeaderName::from_bytes(n.as_bytes())).transpose()?;
        Ok(self)
    }

    pub fn generator<G: RequestIdGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Arc::new(generator);
        self
    }
}

impl<S> Layer<S> for MLayer {
    type Service = Middleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Middleware {
            inner,
            request_header: self.request_header.clone(),
            response_header: self.response_header.clone(),
            generator: self.generator.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Middleware<S> {
    inner: S,
    request_header: Option<HeaderName>,
    response_header: Option<HeaderName>,
    generator: Arc<dyn RequestIdGenerator>,
}

impl<S> Service<Request> for Middleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        trace!("start issue request id");
        // an id issued further out (nested layer) is kept
        let request_id = match request.extensions().get::<RequestId>() {
            Some(existing) => Some(existing.clone()),
            None => self.generator.generate(&request).map(RequestId),
        };
        let Some(request_id) = request_id else {
            let future = self.inner.call(request);
            return Box::pin(future);
        };
        info!(request_id = %request_id, "request id issued");

        let header_val = HeaderValue::from_str(&request_id.0)
            .inspect_err(|e| {
                error!(request_id = %request_id, e = %e, "request id is not a header value");
            })
            .ok();
        if let (Some(name), Some(val)) = (&self.request_header, &header_val) {
            request.headers_mut().insert(name.clone(), val.clone());
        }
        let span = info_span!("request", request_id = %request_id);
        request.extensions_mut().insert(request_id);

        let future = span.in_scope(|| self.inner.call(request));
        let response_header = self.response_header.clone();
        Box::pin(
            async move {
                let mut response: Response = future.await?;
                if let (Some(name), Some(val)) = (response_header, header_val) {
                    response.headers_mut().insert(name, val);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use axum::{Extension, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn echo(Extension(request_id): Extension<RequestId>) -> String {
        request_id.0
    }

    async fn call(app: Router) -> (Response, String) {
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let (parts, body) = response.into_parts();
        let body = body.collect().await.unwrap().to_bytes();
        (
            Response::from_parts(parts, Body::empty()),
            String::from_utf8(body.to_vec()).unwrap(),
        )
    }

    #[test_log::test(tokio::test)]
    pub async fn test_issue_request_id() {
        let app = Router::new().route("/", get(echo)).layer(new());
        let (response, body) = call(app).await;
        let header = response.headers().get("Request-Id").unwrap().to_str().unwrap();
        assert_eq!(header, body);
        assert!(uuid::Uuid::parse_str(&body).is_ok());
    }

    #[derive(Clone)]
    struct Fixed(&'static str);

    impl RequestIdGenerator for Fixed {
        fn generate(&self, _request: &Request) -> Option<String> {
            Some(self.0.to_owned())
        }
    }

    struct Never;

    impl RequestIdGenerator for Never {
        fn generate(&self, _request: &Request) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    pub async fn test_custom_generator_and_header() {
        let layer = new()
            .generator(Fixed("req-1"))
            .response_header(Some("X-Correlation-Id"))
            .unwrap();
        let app = Router::new().route("/", get(echo)).layer(layer);
        let (response, body) = call(app).await;
        assert_eq!(body, "req-1");
        assert_eq!(response.headers().get("x-correlation-id").unwrap(), "req-1");
        assert!(response.headers().get(header::REQUEST_ID).is_none());
    }

    #[tokio::test]
    pub async fn test_outer_id_is_kept() {
        let app = Router::new()
            .route("/", get(echo))
            .layer(new().generator(Fixed("inner")))
            .layer(new().generator(Fixed("outer")));
        let (response, body) = call(app).await;
        assert_eq!(body, "outer");
        assert_eq!(response.headers().get(header::REQUEST_ID).unwrap(), "outer");
    }

    #[tokio::test]
    pub async fn test_no_id() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(new().generator(Never));
        let (response, body) = call(app).await;
        assert_eq!(body, "ok");
        assert!(response.headers().get(header::REQUEST_ID).is_none());
    }
}

//! axum extractors for the two pagination strategies.
//!
//! A route declares its pagination parameters by carrying an `Arc<Endpoint>` request
//! extension, installed with [`declare`]. The const parameter of [`Sliced`] and [`Chunked`]
//! is the position of the parameter in that declaration, so qualifiers and endpoint
//! defaults apply. A route without a declaration reads every extractor as an unqualified,
//! default-less parameter; a second pagination extractor on such a route is ambiguous.

use super::chunkable::ChunkableResolver;
use super::endpoint::{Binding, ConfigError, Endpoint};
use super::params::ParameterSource;
use super::resolver::{PaginationResolver, ResolveError};
use super::sliceable::SliceableResolver;
use crate::data::{Chunkable, Sliceable};
use crate::http::error::ErrorResponse;
use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::Extension;
use std::collections::HashMap;
use std::sync::Arc;

/// Query string parameters of the request, as a [`ParameterSource`].
pub async fn query_parameters<S>(
    parts: &mut Parts,
    state: &S,
) -> Result<HashMap<String, String>, ErrorResponse>
where
    S: Send + Sync,
{
    let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state).await?;
    Ok(params)
}

/// Checks `endpoint` and wraps it as a route layer for the extractors.
pub fn declare(endpoint: Endpoint) -> Result<Extension<Arc<Endpoint>>, ConfigError> {
    Ok(Extension(Arc::new(endpoint.register()?)))
}

/// Parameters collected from the extractors of an undeclared route.
#[derive(Debug, Clone)]
struct Undeclared(Endpoint);

fn resolve_in_route<R, P>(
    parts: &mut Parts,
    resolver: &R,
    position: usize,
    params: &P,
    push: fn(Endpoint) -> Endpoint,
) -> Result<R::Descriptor, ResolveError>
where
    R: PaginationResolver,
    P: ParameterSource + ?Sized,
{
    if let Some(endpoint) = parts.extensions.get::<Arc<Endpoint>>() {
        return resolver.resolve_parameter(endpoint, position, params);
    }
    let endpoint = match parts.extensions.remove::<Undeclared>() {
        Some(Undeclared(endpoint)) => endpoint,
        None => Endpoint::new(parts.uri.path()),
    };
    let endpoint = push(endpoint);
    let resolved =
        resolver.resolve_parameter(&endpoint, endpoint.parameters().len().saturating_sub(1), params);
    parts.extensions.insert(Undeclared(endpoint));
    resolved
}

/// Offset pagination of the parameter at `POSITION` of the route's declared endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sliced<const POSITION: usize = 0>(pub Sliceable);

#[axum::async_trait]
impl<S, const POSITION: usize> FromRequestParts<S> for Sliced<POSITION>
where
    S: Send + Sync,
    Arc<SliceableResolver>: FromRef<S>,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = query_parameters(parts, state).await?;
        let resolver = Arc::<SliceableResolver>::from_ref(state);
        let sliceable = resolve_in_route(parts, resolver.as_ref(), POSITION, &params, |e| {
            e.sliceable(Binding::unqualified())
        })?;
        Ok(Self(sliceable))
    }
}

/// Cursor pagination of the parameter at `POSITION` of the route's declared endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunked<const POSITION: usize = 0>(pub Chunkable);

#[axum::async_trait]
impl<S, const POSITION: usize> FromRequestParts<S> for Chunked<POSITION>
where
    S: Send + Sync,
    Arc<ChunkableResolver>: FromRef<S>,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = query_parameters(parts, state).await?;
        let resolver = Arc::<ChunkableResolver>::from_ref(state);
        let chunkable = resolve_in_route(parts, resolver.as_ref(), POSITION, &params, |e| {
            e.chunkable(Binding::unqualified())
        })?;
        Ok(Self(chunkable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PaginationRelation;
    use crate::web::endpoint::SliceableDefault;
    use axum::http::Request;

    fn parts(uri: &str) -> Parts {
        Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    pub fn test_undeclared_single_parameter() {
        let mut parts = parts("/items?size=5");
        let actual = resolve_in_route(
            &mut parts,
            &SliceableResolver::default(),
            0,
            &[("size", "5")],
            |e| e.sliceable(Binding::unqualified()),
        )
        .unwrap();
        assert_eq!(actual, Sliceable::of(0, None, 5));
    }

    #[test]
    pub fn test_undeclared_second_parameter_is_ambiguous() {
        let mut parts = parts("/items");
        let params = [("next", "abc")];
        assert!(resolve_in_route(
            &mut parts,
            &SliceableResolver::default(),
            0,
            &params,
            |e| e.sliceable(Binding::unqualified()),
        )
        .is_ok());
        let err = resolve_in_route(
            &mut parts,
            &ChunkableResolver::default(),
            0,
            &params,
            |e| e.chunkable(Binding::unqualified()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Config(ConfigError::Ambiguous("/items".to_owned()))
        );
    }

    #[test]
    pub fn test_declared_endpoint() {
        let Extension(endpoint) = declare(
            Endpoint::new("feed")
                .sliceable(Binding::qualified("posts").with_defaults(SliceableDefault::with_size(5)))
                .chunkable(Binding::qualified("events")),
        )
        .unwrap();
        let mut parts = parts("/feed");
        parts.extensions.insert(endpoint);
        let params = [("posts_page_number", "2"), ("events_prev", "t1")];

        let sliceable = resolve_in_route(
            &mut parts,
            &SliceableResolver::default(),
            0,
            &params,
            |e| e.sliceable(Binding::unqualified()),
        )
        .unwrap();
        assert_eq!(sliceable, Sliceable::of(2, None, 5));

        let chunkable = resolve_in_route(
            &mut parts,
            &ChunkableResolver::default(),
            1,
            &params,
            |e| e.chunkable(Binding::unqualified()),
        )
        .unwrap();
        assert_eq!(chunkable.pagination_token(), Some("t1"));
        assert_eq!(
            chunkable.pagination_relation(),
            Some(PaginationRelation::Prev)
        );
    }

    #[test]
    pub fn test_declare_rejects_ambiguous_endpoint() {
        let err = declare(
            Endpoint::new("feed")
                .sliceable(Binding::unqualified())
                .chunkable(Binding::unqualified()),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::Ambiguous("feed".to_owned()));
    }
}

//! Method override for HTML forms, which can only send GET and POST.
//!
//! A `POST` whose query string carries `_method=PUT|PATCH|DELETE` is routed as that verb.
//! Wrap the router with it (`from_fn(method_override).layer(router)`) so the rewrite
//! happens before routing.

use axum::{
    extract::{Query, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct OverrideParams {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// The verb a `POST` should be treated as, if its query string asks for one.
pub fn override_method(req: &Request) -> Option<Method> {
    if req.method() != Method::POST {
        return None;
    }
    let Query(params) = Query::<OverrideParams>::try_from_uri(req.uri()).ok()?;
    match params.method?.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

pub async fn method_override(mut req: Request, next: Next) -> Response {
    if let Some(method) = override_method(&req) {
        tracing::debug!(path = %req.uri().path(), %method, "method override");
        *req.method_mut() = method;
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(method: Method, uri: &str) -> Request {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn post_with_override_param_is_rewritten() {
        assert_eq!(override_method(&request(Method::POST, "/pais/1?_method=PUT")), Some(Method::PUT));
        assert_eq!(override_method(&request(Method::POST, "/pais/1?_method=delete")), Some(Method::DELETE));
    }

    #[test]
    fn other_requests_are_left_alone() {
        assert_eq!(override_method(&request(Method::GET, "/pais/1?_method=DELETE")), None);
        assert_eq!(override_method(&request(Method::POST, "/pais")), None);
        assert_eq!(override_method(&request(Method::POST, "/pais?_method=TRACE")), None);
    }
}

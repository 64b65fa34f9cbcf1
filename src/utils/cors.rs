use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::core::error::ConfigError;
use crate::core::state::AppState;

/// Cross-origin rules for the issuance endpoint.
///
/// Unlike `tower_http::cors::CorsLayer`, a rejected origin gets no CORS
/// headers at all and the request still reaches the handler.
#[derive(Debug)]
pub(crate) struct CorsPolicy {
    allowed_origin_suffixes: Vec<String>,
    allowed_methods: Vec<Method>,
    allow_methods: HeaderValue,
    max_age: HeaderValue,
}

impl CorsPolicy {
    pub(crate) fn new(
        allowed_origin_suffixes: Vec<String>,
        allowed_methods: &[String],
        max_age: Duration,
    ) -> Result<Self, ConfigError> {
        let allowed_methods = allowed_methods
            .iter()
            .map(|method| Method::from_bytes(method.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;

        let allow_methods = HeaderValue::from_str(
            &allowed_methods
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )?;

        Ok(Self {
            allowed_origin_suffixes,
            allowed_methods,
            allow_methods,
            max_age: HeaderValue::from(max_age.as_secs()),
        })
    }

    pub(crate) fn allows(&self, origin: &str, method: &str) -> bool {
        let origin_allowed = self
            .allowed_origin_suffixes
            .iter()
            .any(|suffix| origin.ends_with(suffix.as_str()));

        let method_allowed = self
            .allowed_methods
            .iter()
            .any(|allowed| allowed.as_str() == method);

        origin_allowed && method_allowed
    }

    fn apply(&self, origin: HeaderValue, headers: &mut HeaderMap) {
        headers.append(
            header::VARY,
            HeaderValue::from_static("Origin, Access-Control-Request-Method"),
        );
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
    }
}

pub(crate) async fn cors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = request.headers();

    let origin = headers
        .get(header::ORIGIN)
        .filter(|origin| {
            let Ok(origin) = origin.to_str() else {
                return false;
            };

            let preflight_allowed = *request.method() == Method::OPTIONS
                && headers
                    .get(header::ACCESS_CONTROL_REQUEST_METHOD)
                    .and_then(|requested| requested.to_str().ok())
                    .is_some_and(|requested| state.cors.allows(origin, requested));

            preflight_allowed || state.cors.allows(origin, request.method().as_str())
        })
        .cloned();

    let mut response = next.run(request).await;

    match origin {
        Some(origin) => state.cors.apply(origin, response.headers_mut()),
        None => tracing::trace!("no CORS headers for request"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(
            vec!["dsv.su.se".into()],
            &["GET".to_string()],
            Duration::from_secs(86400),
        )
        .unwrap()
    }

    #[test]
    fn test_allows_matching_suffix() {
        let policy = policy();

        assert!(policy.allows("https://sub.dsv.su.se", "GET"));
        assert!(policy.allows("https://dsv.su.se", "GET"));
    }

    #[test]
    fn test_rejects_other_origins_and_methods() {
        let policy = policy();

        assert!(!policy.allows("https://evil.example", "GET"));
        assert!(!policy.allows("https://dsv.su.se.evil.example", "GET"));
        assert!(!policy.allows("https://sub.dsv.su.se", "POST"));
        assert!(!policy.allows("https://sub.dsv.su.se", "OPTIONS"));
        assert!(!policy.allows("https://sub.dsv.su.se", "get"));
    }

    #[test]
    fn test_apply_headers() {
        let policy = CorsPolicy::new(
            vec!["dsv.su.se".into()],
            &["GET".to_string(), "POST".to_string()],
            Duration::from_secs(60),
        )
        .unwrap();

        let mut headers = HeaderMap::new();
        policy.apply(HeaderValue::from_static("https://dsv.su.se"), &mut headers);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://dsv.su.se");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "60");
        assert_eq!(
            headers[header::VARY],
            "Origin, Access-Control-Request-Method"
        );
    }

    #[test]
    fn test_invalid_method_is_config_error() {
        assert!(matches!(
            CorsPolicy::new(vec![], &["GE T".to_string()], Duration::from_secs(1)),
            Err(ConfigError::Method(_))
        ));
    }
}

use axum::http::{HeaderValue, Method, header};
use core_config::Environment;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_ENV_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// CORS for the given origins: JSON CRUD methods, one hour preflight cache.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Split a comma-separated origin list, skipping blanks.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ENV_VAR, e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ENV_VAR),
        ));
    }

    Ok(origins)
}

/// CORS layer for the current deployment.
///
/// - `CORS_ALLOWED_ORIGIN` set: only those origins.
/// - unset in development: permissive.
/// - unset in production: `None`, no CORS headers at all.
pub fn cors_layer_from_env(environment: &Environment) -> io::Result<Option<CorsLayer>> {
    match std::env::var(CORS_ENV_VAR) {
        Ok(raw) => {
            let origins = parse_allowed_origins(&raw)?;
            tracing::info!(origins = %raw, "CORS restricted to configured origins");
            Ok(Some(create_cors_layer(origins)))
        }
        Err(_) if environment.is_development() => {
            tracing::warn!("{} not set, using permissive CORS", CORS_ENV_VAR);
            Ok(Some(CorsLayer::permissive()))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins("http://localhost:3000, https://example.com,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_allowed_origins_rejects_empty() {
        let err = parse_allowed_origins(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cors_layer_from_env() {
        temp_env::with_var_unset(CORS_ENV_VAR, || {
            assert!(cors_layer_from_env(&Environment::Development).unwrap().is_some());
            assert!(cors_layer_from_env(&Environment::Production).unwrap().is_none());
        });

        temp_env::with_var(CORS_ENV_VAR, Some("https://example.com"), || {
            assert!(cors_layer_from_env(&Environment::Production).unwrap().is_some());
        });

        temp_env::with_var(CORS_ENV_VAR, Some("bad\norigin"), || {
            assert!(cors_layer_from_env(&Environment::Production).is_err());
        });
    }
}

use poem::http::StatusCode;
use tracing::error;

use crate::domain::errors::DomainError;

/// Client errors carry their message; server errors are logged and
/// answered with an opaque body.
pub fn map_domain_error(err: DomainError) -> poem::Error {
    match err {
        DomainError::InvalidInput(_) => {
            poem::Error::from_string(err.to_string(), StatusCode::BAD_REQUEST)
        }
        DomainError::NotFound(_) => poem::Error::from_string(err.to_string(), StatusCode::NOT_FOUND),
        DomainError::Conflict(_) => poem::Error::from_string(err.to_string(), StatusCode::CONFLICT),
        DomainError::Consistency(_) | DomainError::Transient(_) => {
            error!(error = %format!("{err:#}"), "request failed");
            poem::Error::from_string("internal server error", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (DomainError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                DomainError::Consistency("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Transient(anyhow::anyhow!("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(map_domain_error(err).status(), expected);
        }
    }

    #[test]
    fn server_errors_hide_the_cause() {
        let err = map_domain_error(DomainError::Transient(anyhow::anyhow!("password=hunter2")));
        assert_eq!(err.to_string(), "internal server error");
    }
}

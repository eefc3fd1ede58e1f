//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use staybook_domain::StaybookError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StaybookError);

impl From<InfraError> for StaybookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StaybookError> for InfraError {
    fn from(value: StaybookError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoStaybookError {
    fn into_staybook(self) -> StaybookError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → StaybookError */
/* -------------------------------------------------------------------------- */

impl IntoStaybookError for SqlError {
    fn into_staybook(self) -> StaybookError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        StaybookError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        StaybookError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        StaybookError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 275) => {
                        StaybookError::Database(format!("check constraint violation: {message}"))
                    }
                    _ => StaybookError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => StaybookError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                StaybookError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                StaybookError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                StaybookError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => StaybookError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => StaybookError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_staybook())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → StaybookError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(StaybookError::Database(format!("connection pool: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → StaybookError */
/* -------------------------------------------------------------------------- */

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        let reason = if value.is_panic() { "panicked" } else { "was cancelled" };
        InfraError(StaybookError::Internal(format!("blocking database task {reason}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → StaybookError */
/* -------------------------------------------------------------------------- */

impl IntoStaybookError for HttpError {
    fn into_staybook(self) -> StaybookError {
        if self.is_timeout() {
            return StaybookError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return StaybookError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_to_error(status, None);
        }

        if self.is_decode() {
            return StaybookError::Network(format!("malformed response body: {self}"));
        }

        StaybookError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_staybook())
    }
}

/// Map an unsuccessful HTTP status to the matching domain error, keeping the
/// response body as detail when there is one.
pub fn status_to_error(status: reqwest::StatusCode, detail: Option<&str>) -> StaybookError {
    let code = status.as_u16();
    let mut message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if let Some(detail) = detail.map(str::trim).filter(|d| !d.is_empty()) {
        message.push_str(": ");
        message.push_str(detail);
    }

    match code {
        401 | 403 => StaybookError::Auth(message),
        404 | 410 => StaybookError::NotFound(message),
        429 => StaybookError::Network(message),
        400..=499 => StaybookError::InvalidInput(message),
        _ => StaybookError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Error as SqlError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: StaybookError = InfraError::from(err).into();
        match mapped {
            StaybookError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: StaybookError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, StaybookError::NotFound(_)));
    }

    #[test]
    fn gone_status_counts_as_not_found() {
        let mapped = status_to_error(StatusCode::GONE, Some("deleted"));
        assert_eq!(mapped, StaybookError::NotFound("HTTP 410 Gone: deleted".into()));
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: StaybookError = InfraError::from(error).into();
        match mapped {
            StaybookError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }
}

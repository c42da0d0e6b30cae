//! Conversions from external infrastructure errors into domain errors.

use orderdesk_domain::OrderDeskError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OrderDeskError);

impl From<InfraError> for OrderDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OrderDeskError> for InfraError {
    fn from(value: OrderDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoOrderDeskError {
    fn into_orderdesk(self) -> OrderDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → OrderDeskError */
/* -------------------------------------------------------------------------- */

impl IntoOrderDeskError for HttpError {
    fn into_orderdesk(self) -> OrderDeskError {
        if self.is_timeout() {
            return OrderDeskError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return OrderDeskError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => OrderDeskError::Auth(message),
                404 => OrderDeskError::NotFound(message),
                429 => OrderDeskError::Network(message),
                400..=499 => OrderDeskError::Validation(message),
                _ => OrderDeskError::Network(message),
            };
        }

        if self.is_decode() {
            return OrderDeskError::Parse(self.to_string());
        }

        OrderDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_orderdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → OrderDeskError */
/* -------------------------------------------------------------------------- */

impl IntoOrderDeskError for JsonError {
    fn into_orderdesk(self) -> OrderDeskError {
        OrderDeskError::Parse(format!("invalid JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_orderdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → OrderDeskError */
/* -------------------------------------------------------------------------- */

impl IntoOrderDeskError for UrlError {
    fn into_orderdesk(self) -> OrderDeskError {
        OrderDeskError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_orderdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

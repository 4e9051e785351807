//! Linear API errors.

use thiserror::Error;

/// Failures talking to the Linear API. All are fatal and never retried.
#[derive(Error, Debug)]
pub enum LinearError {
    /// The request could not be sent or the connection failed.
    #[error("Linear API error: {0}")]
    Network(String),

    /// The API answered with a non-success HTTP status.
    #[error("Linear API error: HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The GraphQL response carried an `errors` array.
    #[error("Linear API error: {0}")]
    GraphQl(String),

    /// The response body was not the expected shape.
    #[error("Linear API error: invalid response: {0}")]
    InvalidResponse(String),
}

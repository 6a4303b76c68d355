//! Gateway error taxonomy.

use std::fmt;

/// The upstream operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LocationSuggestions,
    Weather,
}

impl Operation {
    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::LocationSuggestions => "geocoding",
            Operation::Weather => "forecast",
        }
    }

    /// Fixed message shown to clients when the upstream call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::LocationSuggestions => "Failed to fetch location suggestions",
            Operation::Weather => "Failed to fetch weather data",
        }
    }

    /// Fixed message shown to clients when the upstream payload is unusable.
    pub fn shape_message(&self) -> &'static str {
        match self {
            Operation::LocationSuggestions => "Unexpected response from the geocoding service",
            Operation::Weather => "Unexpected response from the weather service",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can go wrong between a client request and its reshaped response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required client parameter is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The upstream answered with a status other than 200.
    #[error("{operation} upstream returned status {status}")]
    UpstreamStatus { operation: Operation, status: u16 },

    /// The upstream answered 200 with a payload that cannot be reshaped.
    #[error("{operation} upstream returned an unusable payload: {reason}")]
    UpstreamShape { operation: Operation, reason: String },

    /// The upstream could not be reached.
    #[error("{operation} upstream request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The inbound request deadline passed before the upstream answered.
    #[error("{operation} upstream did not answer within {elapsed_secs}s")]
    Timeout {
        operation: Operation,
        elapsed_secs: u64,
    },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn shape(operation: Operation, reason: impl Into<String>) -> Self {
        Self::UpstreamShape {
            operation,
            reason: reason.into(),
        }
    }

    /// Message safe to hand back to the client. Upstream detail never leaks here.
    pub fn client_message(&self) -> &str {
        match self {
            GatewayError::Validation(message) => message.as_str(),
            GatewayError::UpstreamStatus { operation, .. }
            | GatewayError::Transport { operation, .. }
            | GatewayError::Timeout { operation, .. } => operation.failure_message(),
            GatewayError::UpstreamShape { operation, .. } => operation.shape_message(),
        }
    }
}

//! Error types.
//!
//! - `CosmoError`: typed failures raised by the numerical core (resolution,
//!   domain checks, quadrature, batch evaluation).
//! - `AppError`: what the `cosmo` binary reports, carrying a process exit code.

use thiserror::Error;

/// Failures raised by parameter resolution and the numerical engines.
///
/// None of these are caught inside the library; they propagate to the caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CosmoError {
    /// A dynamic specification had a shape the resolver cannot interpret.
    #[error("unsupported cosmology specification type: {found}")]
    UnsupportedSpec { found: String },

    /// A textual model name that does not identify a known model.
    #[error("unknown cosmology '{name}' (expected 'default' or '{expected}')")]
    UnknownName { name: String, expected: String },

    /// A parameter mapping key outside `{H0, Om0, Ode0}`.
    #[error("unknown cosmology parameter '{key}' (expected one of H0, Om0, Ode0)")]
    UnknownParameter { key: String },

    /// A parameter value that cannot describe a cosmology.
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Redshift outside the domain of the Friedmann evaluator.
    #[error("redshift z={z} is outside the model domain: {reason}")]
    Domain { z: f64, reason: &'static str },

    /// Quadrature did not reach the requested tolerance.
    #[error(
        "integration over [{a}, {b}] did not converge: {reason} \
         (estimated error {error_estimate:e} after {subdivisions} subdivisions)"
    )]
    Integration {
        a: f64,
        b: f64,
        error_estimate: f64,
        subdivisions: usize,
        reason: &'static str,
    },

    /// First failing element of a vectorized evaluation.
    #[error("element {index} (z={z}) failed")]
    Batch {
        index: usize,
        z: f64,
        #[source]
        source: Box<CosmoError>,
    },
}

impl CosmoError {
    /// Whether the failure came from bad input rather than the numerics.
    pub fn is_input_error(&self) -> bool {
        match self {
            CosmoError::UnsupportedSpec { .. }
            | CosmoError::UnknownName { .. }
            | CosmoError::UnknownParameter { .. }
            | CosmoError::InvalidParameter { .. }
            | CosmoError::Domain { .. } => true,
            CosmoError::Integration { .. } => false,
            CosmoError::Batch { source, .. } => source.is_input_error(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CosmoError> for AppError {
    fn from(err: CosmoError) -> Self {
        let exit_code = if err.is_input_error() { 2 } else { 3 };
        let mut message = err.to_string();
        let mut cause = std::error::Error::source(&err);
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }
        AppError::new(exit_code, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_exit_code_two() {
        let err = CosmoError::Domain {
            z: -1.5,
            reason: "z must be greater than -1",
        };
        assert_eq!(AppError::from(err).exit_code(), 2);
    }

    #[test]
    fn batch_error_keeps_the_source_classification() {
        let inner = CosmoError::Integration {
            a: 0.0,
            b: 1.0,
            error_estimate: 1.0,
            subdivisions: 10,
            reason: "subdivision limit reached",
        };
        let err = CosmoError::Batch {
            index: 3,
            z: 1.0,
            source: Box::new(inner),
        };
        let app = AppError::from(err);
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().starts_with("element 3 (z=1)"));
    }

    #[test]
    fn batch_cause_is_reported_once() {
        let err = CosmoError::Batch {
            index: 1,
            z: -1.5,
            source: Box::new(CosmoError::Domain {
                z: -1.5,
                reason: "redshift must be greater than -1",
            }),
        };
        assert_eq!(err.to_string(), "element 1 (z=-1.5) failed");
        let inner = std::error::Error::source(&err).unwrap().to_string();
        assert!(inner.contains("must be greater than -1"));

        let message = AppError::from(err).to_string();
        assert_eq!(message.matches("must be greater than -1").count(), 1, "{message}");
        assert!(message.starts_with("element 1 (z=-1.5) failed: redshift z=-1.5"));
    }
}

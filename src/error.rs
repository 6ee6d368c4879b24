use thiserror::Error;

/// Errors raised while evaluating a superposed pressure response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuperpositionError {
    /// An input array is shorter than the well count.
    #[error("{what} has {actual} entries but {expected} wells were requested")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An input drives the exponential-integral argument to a singular or undefined value.
    ///
    /// Only raised by the opt-in validation helpers; the evaluator itself lets
    /// `inf`/`nan` propagate.
    #[error("invalid {parameter}: {value}")]
    Domain { parameter: String, value: f64 },
}

impl SuperpositionError {
    pub(crate) fn domain(parameter: impl Into<String>, value: f64) -> Self {
        Self::Domain {
            parameter: parameter.into(),
            value,
        }
    }
}

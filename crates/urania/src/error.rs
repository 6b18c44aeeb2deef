use thiserror::Error;

/// Errors raised by an ephemeris provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: String,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed at JD {jd}: {message}")]
    HouseCalculationFailed { jd: f64, message: String },
    #[error("Correction angle unavailable at JD {jd}: {message}")]
    CorrectionAngleFailed { jd: f64, message: String },
}

/// Errors that abort a placement computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid birth moment ({field} = {value:?}): {reason}")]
    InvalidBirthMoment {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Provider calculation failed during {stage}: {source}")]
    ProviderCalculation {
        stage: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("Ephemeris configuration error: {message}")]
    Configuration { message: String },
    #[error("Placement worker is not running")]
    WorkerStopped,
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::InvalidBirthMoment {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn provider(stage: &'static str) -> impl FnOnce(ProviderError) -> Self {
        move |source| ChartError::ProviderCalculation { stage, source }
    }

    /// Provider failures are deterministic, but one retry is allowed before giving up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChartError::ProviderCalculation { .. })
    }
}

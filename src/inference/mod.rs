//! The inference client: one PNG upload, one classification back.
//!
//! [`InferenceClient::predict`] has three steps:
//!
//! 1. **encode**: snapshot the raster into a PNG data URI
//!    ([`InferenceClient::prepare`]). This happens before any waiting, so
//!    drawing that continues afterwards cannot leak into the payload.
//! 2. **transmit**: POST `{"image": "<data URI>"}` as JSON to the configured
//!    endpoint through a [`Transport`].
//! 3. **interpret**: fold whatever came back, including transport failures,
//!    into exactly one [`PredictionResult`] ([`interpret_response`]).
//!
//! Nothing here retries, caches or falls back locally, and no error escapes
//! the client: every failure ends up in [`PredictionResult::Error`].

pub mod encode;
mod report;
mod transport;

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::QuickdigitError;
use crate::surface::PixelBuffer;

pub use report::ResultPanel;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

/// Shown when the server rejects the input without saying why.
pub const PREDICTION_FAILED: &str = "Prediction failed";

/// Shown when the exchange broke down without a usable description.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Outcome of one inference exchange.
///
/// Serializes as `{"digit": 7, "confidence": 92.5}` or
/// `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Digit {
        digit: i64,
        /// Percentage on a 0–100 scale, exactly as the server sent it.
        #[serde(skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
    Error {
        error: String,
    },
}

impl PredictionResult {
    /// Builds the error variant, substituting `fallback` for an empty message.
    pub fn error(message: impl Into<String>, fallback: &str) -> Self {
        let message = message.into();
        let error = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        Self::Error { error }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn digit(&self) -> Option<i64> {
        match self {
            Self::Digit { digit, .. } => Some(*digit),
            Self::Error { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Digit { confidence, .. } => *confidence,
            Self::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Digit { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

/// Folds a finished (or failed) exchange into a [`PredictionResult`].
///
/// The body is parsed as JSON before the status is looked at, so a body that
/// is not JSON is reported as a transport failure whatever the status.
pub fn interpret_response(outcome: Result<RawResponse, TransportError>) -> PredictionResult {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return PredictionResult::error(err.message(), UNEXPECTED_ERROR),
    };

    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(err) => return PredictionResult::error(err.to_string(), UNEXPECTED_ERROR),
    };

    if response.is_success() {
        if let Some(digit) = prediction_field(&body) {
            let confidence = body.get("confidence").and_then(Value::as_f64);
            check_ranges(digit, confidence);
            return PredictionResult::Digit { digit, confidence };
        }
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default();
    debug!(
        "prediction rejected (status {}): {:?}",
        response.status, message
    );
    PredictionResult::error(message, PREDICTION_FAILED)
}

/// `prediction` as an integer label. Integral floats are accepted; `null`
/// and every other type count as absent.
fn prediction_field(body: &Value) -> Option<i64> {
    let value = body.get("prediction")?;
    if let Some(digit) = value.as_i64() {
        return Some(digit);
    }
    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

fn check_ranges(digit: i64, confidence: Option<f64>) {
    if !(0..=9).contains(&digit) {
        warn!("server predicted {}, which is not a single digit", digit);
    }
    if let Some(confidence) = confidence {
        if !(0.0..=100.0).contains(&confidence) {
            warn!(
                "server confidence {} is outside 0-100; passing it through",
                confidence
            );
        }
    }
}

/// An encoded snapshot, ready to be sent.
///
/// Owns its payload, so the surface it came from can keep changing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRequest {
    endpoint: String,
    body: String,
}

impl PredictionRequest {
    /// Frames an already-encoded data URI for `endpoint`.
    pub fn new(endpoint: impl Into<String>, image: String) -> Self {
        let body = serde_json::json!({ "image": image }).to_string();
        Self {
            endpoint: endpoint.into(),
            body,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The JSON request body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Performs the exchange once and interprets the outcome.
    pub fn send<T: Transport + ?Sized>(&self, transport: &T) -> PredictionResult {
        interpret_response(transport.post_json(&self.endpoint, &self.body))
    }
}

/// Client for the remote digit classifier.
#[derive(Clone, Debug)]
pub struct InferenceClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl InferenceClient<HttpTransport> {
    /// A client that talks HTTP, honouring the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl<T: Transport> InferenceClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Encodes a snapshot of `buffer` into an owned request.
    pub fn prepare(&self, buffer: &PixelBuffer) -> Result<PredictionRequest, QuickdigitError> {
        let image = encode::to_data_uri(buffer)?;
        Ok(PredictionRequest::new(self.config.endpoint.clone(), image))
    }

    /// Sends a prepared request through this client's transport.
    pub fn send(&self, request: &PredictionRequest) -> PredictionResult {
        request.send(&self.transport)
    }

    /// Encodes `buffer`, sends it, and interprets the answer.
    ///
    /// Always yields exactly one variant; no error propagates past here.
    pub fn predict(&self, buffer: &PixelBuffer) -> PredictionResult {
        match self.prepare(buffer) {
            Ok(request) => self.send(&request),
            Err(err) => PredictionResult::error(err.to_string(), UNEXPECTED_ERROR),
        }
    }
}

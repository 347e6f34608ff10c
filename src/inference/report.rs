//! Human-readable rendering of prediction outcomes.

use std::fmt;

use super::PredictionResult;

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit { digit, confidence } => {
                write!(f, "Model thinks it is {}", digit)?;
                if let Some(confidence) = confidence {
                    write!(f, " (confidence {:.1}%)", confidence)?;
                }
                Ok(())
            }
            Self::Error { error } => f.write_str(error),
        }
    }
}

/// What the result area shows between and during predictions.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultPanel {
    /// Nothing predicted since the last clear.
    #[default]
    Hint,
    /// A request is outstanding.
    Loading,
    Done(PredictionResult),
}

impl ResultPanel {
    /// Back to the hint, as after a clear.
    pub fn reset(&mut self) {
        *self = Self::Hint;
    }

    /// Marks a request as outstanding, dropping the previous outcome.
    pub fn start(&mut self) {
        *self = Self::Loading;
    }

    pub fn finish(&mut self, result: PredictionResult) {
        *self = Self::Done(result);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Done(result) => Some(result),
            _ => None,
        }
    }
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hint => f.write_str("Draw a digit and tap Predict."),
            Self::Loading => f.write_str("Predicting…"),
            Self::Done(result) => fmt::Display::fmt(result, f),
        }
    }
}

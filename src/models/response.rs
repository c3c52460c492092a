use std::path::PathBuf;
use thiserror::Error;

/// Value produced by a dialog the human completed
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Selected labels, in list order
    Choices(Vec<String>),
    /// Paths picked through a native file or folder chooser
    Files(Vec<PathBuf>),
    Confirmed(bool),
    Acknowledged,
}

/// Why a dialog ended without an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Cancel button or Escape
    UserCancelled,
    /// Window chrome close control
    WindowClosed,
    /// The request deadline passed
    TimedOut,
}

impl CancelReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CancelReason::UserCancelled => "user_cancelled",
            CancelReason::WindowClosed => "window_closed",
            CancelReason::TimedOut => "timed_out",
        }
    }
}

/// Errors that can end a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("GUI system not available: {0}")]
    GuiUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Dialog toolkit error: {0}")]
    Toolkit(String),

    #[error("Dialog bridge is shutting down")]
    ShuttingDown,
}

/// Terminal outcome of one request.
///
/// Exactly one of answer, cancellation or failure holds; callers (and the wire
/// envelope built from this type) rely on that.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Answered(Answer),
    Cancelled(CancelReason),
    Failed(BridgeError),
}

impl Response {
    pub fn is_answered(&self) -> bool {
        matches!(self, Response::Answered(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Response::Cancelled(_))
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Response::Cancelled(CancelReason::TimedOut))
    }

    pub fn answer(&self) -> Option<&Answer> {
        match self {
            Response::Answered(answer) => Some(answer),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&BridgeError> {
        match self {
            Response::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BridgeError> for Response {
    fn from(err: BridgeError) -> Self {
        Response::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_exactly_one_outcome() {
        let cases = [
            Response::Answered(Answer::Text("Ada".into())),
            Response::Cancelled(CancelReason::WindowClosed),
            Response::Failed(BridgeError::Toolkit("boom".into())),
        ];

        for response in cases {
            let signals = [
                response.is_answered(),
                response.is_cancelled(),
                response.error().is_some(),
            ];
            assert_eq!(signals.iter().filter(|s| **s).count(), 1, "{response:?}");
        }
    }

    #[test]
    fn test_timed_out_is_a_cancellation() {
        let response = Response::Cancelled(CancelReason::TimedOut);
        assert!(response.is_cancelled());
        assert!(response.is_timed_out());
        assert_eq!(CancelReason::TimedOut.as_str(), "timed_out");
    }

    #[test]
    fn test_error_display() {
        let err = BridgeError::GuiUnavailable("no display".into());
        assert_eq!(err.to_string(), "GUI system not available: no display");
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a request failed. Stays in process; the wire envelope does not carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The referenced entity does not exist.
    NotFound,
    /// Required input was missing or blank.
    Invalid,
}

/// Envelope returned by every service operation and API route.
///
/// `data` is only meaningful when `success` is true; callers check the flag first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub kind: Option<FailureKind>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            kind: None,
        }
    }

    /// Failure carrying no data and no explanation.
    pub fn failure() -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            kind: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            kind: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: Some(FailureKind::NotFound),
            ..Self::error(message)
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: Some(FailureKind::Invalid),
            ..Self::error(message)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the payload only when the response reports success.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

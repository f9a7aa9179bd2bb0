//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "data": ..., "success": true }`, with
//! extra top-level fields for lists (`total`), mood listings (`mood`), and
//! mutations that report back (`message`). Errors are rendered by
//! [`AppError`](crate::error::AppError).

use serde::Serialize;

/// Standard `{ "data": T, "success": true }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub success: bool,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            success: true,
        }
    }
}

/// List envelope. `total` counts every match, not just the returned page.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub success: bool,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, total: i64) -> Self {
        Self {
            data,
            total,
            success: true,
        }
    }

    /// A list whose total is its own length.
    pub fn complete(data: Vec<T>) -> Self {
        let total = data.len() as i64;
        Self::new(data, total)
    }
}

/// Entries sharing one mood, echoing the requested mood.
#[derive(Debug, Serialize)]
pub struct MoodResponse<T: Serialize> {
    pub data: Vec<T>,
    pub mood: String,
    pub total: i64,
    pub success: bool,
}

impl<T: Serialize> MoodResponse<T> {
    pub fn new(data: Vec<T>, mood: String) -> Self {
        Self {
            total: data.len() as i64,
            data,
            mood,
            success: true,
        }
    }
}

/// Envelope for a mutation that also reports a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

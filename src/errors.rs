// ABOUTME: Unified error handling for the terrain intelligence engine
// ABOUTME: Defines error codes, the AppError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Central error types for the engine. Two rules govern their use:
//!
//! - Insufficient-signal conditions (short streams, flat routes, thin
//!   history) are **not** errors. Analysis entry points return `None` or a
//!   dedicated outcome variant for those, and callers handle them as a
//!   normal branch.
//! - Computation faults (non-finite scalar inputs, invalid configuration)
//!   fail fast with [`AppError::invalid_input`] naming the violated
//!   precondition.
//!
//! Storage faults cross the [`crate::storage`] seam as `anyhow::Error` and
//! are converted at the service layer, where they are logged and treated as
//! cache misses rather than surfaced to callers holding a usable result.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Caller supplied an invalid value (non-finite, out of range)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required input field was missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,
    /// Configuration value failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Persistence layer failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Human-readable description of the error category
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required field",
            Self::ConfigInvalid => "Invalid configuration",
            Self::StorageError => "Storage error",
            Self::InternalError => "Internal error",
        }
    }
}

/// Application error with code, message, and optional source
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Caller supplied an invalid value
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A required input field was missing
    #[must_use]
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Configuration value failed validation
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Persistence layer failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Unexpected internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        let mut converted = Self::storage(error.to_string());
        converted.source = Some(error.into());
        converted
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Validate that a named scalar input is finite, failing fast otherwise
pub fn require_finite(name: &str, value: f64) -> AppResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

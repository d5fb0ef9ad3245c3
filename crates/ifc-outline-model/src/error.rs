// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model access and resolution

use crate::{ModelId, RecordId};
use thiserror::Error;

/// Result type alias for store and resolution operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur while accessing a model
#[derive(Error, Debug)]
pub enum OutlineError {
    /// Opening a model from bytes failed
    #[error("Failed to load model: {0}")]
    LoadFailed(String),

    /// No model is registered under this handle
    #[error("Unknown {0}")]
    UnknownModel(ModelId),

    /// A referenced id has no backing record
    #[error("Record {0} not found")]
    RecordNotFound(RecordId),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl OutlineError {
    /// Create a new load error
    pub fn load(msg: impl Into<String>) -> Self {
        OutlineError::LoadFailed(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        OutlineError::Other(msg.into())
    }
}

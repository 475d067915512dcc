// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for SQL Gate.
//!
//! Holds the error type, the adapter traits, and the request/response types
//! shared by the classifier, the expert adapters, and the tool surface.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SqlGateError;
pub use traits::{ExpertAdapter, PluginAdapter};
pub use types::{AdapterType, ExpertRequest, ExpertResponse, HealthStatus};

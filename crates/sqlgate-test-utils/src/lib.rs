// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SQL Gate integration tests.
//!
//! Provides a deterministic expert adapter so dispatch and tool tests run
//! without a model server.
//!
//! # Components
//!
//! - [`MockExpert`] - Mock expert with queued responses, failure and delay modes

pub mod mock_expert;

pub use mock_expert::MockExpert;

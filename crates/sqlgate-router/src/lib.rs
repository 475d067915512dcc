// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification and dispatch for SQL Gate.
//!
//! This crate provides:
//! - [`classify`]: a grammar-lite check for single-table `SELECT ... WHERE`
//!   queries (pure, no I/O)
//! - [`QueryDispatcher`]: answers simple queries with a local index
//!   recommendation and forwards everything else to an [`ExpertAdapter`]
//!
//! [`ExpertAdapter`]: sqlgate_core::ExpertAdapter

pub mod classifier;
pub mod dispatcher;
pub mod lexer;

pub use classifier::{classify, ClassificationVerdict};
pub use dispatcher::{handle, Analysis, QueryDispatcher, Recommendation, DEFAULT_DIALECT};
pub use lexer::{tokenize, CmpOp, MalformedInput, Token};

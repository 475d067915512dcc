// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait, registry, and built-in tools for SQL Gate.
//!
//! An enclosing agent discovers tools through [`ToolRegistry::tool_definitions`]
//! and calls them by name with JSON input. The only built-in tool is
//! [`builtin::AnalyzeSqlTool`], which classifies a query and answers it
//! locally or through the expert.

pub mod builtin;
pub mod tool;

pub use tool::{Tool, ToolOutput, ToolRegistry};

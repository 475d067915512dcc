// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in tools.

pub mod analyze;

pub use analyze::AnalyzeSqlTool;

use crate::ToolRegistry;
use sqlgate_router::QueryDispatcher;
use std::sync::Arc;

/// Registers all built-in tools into the given registry.
pub fn register_builtins(registry: &mut ToolRegistry, dispatcher: QueryDispatcher) {
    registry.register(Arc::new(AnalyzeSqlTool::new(dispatcher)));
}

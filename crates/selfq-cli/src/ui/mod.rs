//! UI primitives for the selfQ CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, symbols
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Spinner for key derivation
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, Badge};
//! use crate::ui::render::{header, table, badge, hint};
//!
//! let ctx = app.ui_context(args.json, args.format.as_deref());
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "inspect", Some(&path)));
//! println!("{}", table(&ctx, &columns, &rows));
//! ```

mod context;
pub mod mode;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{header, kv, print_error, receipt, table, Column};

pub use progress::Spinner;

//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_2048::{core,input,term,types}` and
//! adds the host-side pieces the binary needs: environment configuration and
//! the [`App`](app::App) that routes actions to a session.

pub mod app;
pub mod config;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub use app::App;
pub use config::AppConfig;

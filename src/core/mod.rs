//! # Core Application Logic
//!
//! This module contains quill's business logic. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • shortcut (modality)  │
//!                    │  • focus (list cursor)  │
//!                    │  • App / update()       │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │  storage   │
//!         │  adapter   │                  │  backends  │
//!         │ (ratatui)  │                  │ (json/mem) │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`shortcut`]: the UI-modality state machine and shortcut table
//! - [`focus`]: keyboard focus over the ordered post list
//! - [`state`]: the `App` struct — all application state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`notify`]: structured toast notices
//! - [`config`]: config file loading and resolution

pub mod action;
pub mod config;
pub mod focus;
pub mod notify;
pub mod shortcut;
pub mod state;

//! Terminal UI for Pairlink
//!
//! A thin shell over [`pairlink_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`pairlink_app::Runtime`]
//!
//! This crate only handles terminal rendering and the real peer link.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use pairlink_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};

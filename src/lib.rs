//! componentry - headless UI components and their terminal showcase
//!
//! Widgets build and update a UI tree held by a [`host::Host`], react to
//! the events dispatched to their listeners and run their animations on a
//! virtual clock. A [`components::Registry`] creates them by name from JSON
//! options. The [`showcase::Showcase`] controller wires every widget to one
//! page, which the binary draws in the terminal.

// Core modules
pub mod components;
pub mod dom;
pub mod host;
pub mod timers;

// Page features
pub mod blob;
pub mod contact;
pub mod highlight;
pub mod icons;
pub mod samples;
pub mod showcase;

// Application
pub mod app;
pub mod cli;
pub mod config;
pub mod focus;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use components::{Component, ComponentAction, Registry, RegistryError};
pub use config::Config;
pub use dom::{Document, EventKind, Key, NodeId, UiEvent};
pub use host::{Host, NoticeVariant};
pub use showcase::Showcase;
pub use timers::Timers;

//! Rosterdesk - sports team and player management TUI
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod form;
pub mod logging;
pub mod notify;
pub mod reducer;
pub mod state;
pub mod ui;
pub mod view;

//! Interactive explorer for labelled tweet datasets.
//!
//! The reactive core (filters, slider bounds, chart selection) lives in
//! [`data`] and [`state`] and has no dependency on a window; [`app`] and
//! [`ui`] render it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

//! Linked image/spectrum viewer engine for spectral data cubes.
//!
//! The [`data`] layer owns the immutable cube and its extraction paths;
//! [`link::LinkController`] is the single writer of the shared
//! [`state::ViewState`]; the [`ui`] views render committed snapshots of it
//! with egui and route pointer events back through the controller.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod link;
pub mod state;
pub mod ui;

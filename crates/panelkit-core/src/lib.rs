//! `panelkit-core` provides the small, reusable building blocks behind panelkit controls.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs synchronously on the UI thread.
//! - Geometry is plain data (`ratatui::layout::Rect`), never a handle into a live view tree.
//!
//! Useful entry points:
//! - [`input::InputEvent`]: backend-neutral key/mouse events.
//! - [`outside::OutsidePointer`]: disposable pointer-down-outside subscriptions.
//! - [`viewport::ViewportState`]: clamped vertical scroll state.
//! - [`render::render_str_clipped`] and [`render::render_scrollbar`]: buffer helpers.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod outside;
pub mod render;
pub mod viewport;

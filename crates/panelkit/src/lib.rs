//! `panelkit` provides controls for settings panels and sidebars in ratatui apps.
//!
//! The controls are event-loop agnostic: the app feeds them backend-neutral
//! [`input::InputEvent`]s and renders them into a `ratatui` buffer each frame. Enable the
//! `crossterm` feature for ready-made event conversion.
//!
//! ## Getting started
//!
//! - [`dropdown::Dropdown`]: single-select menu with keyboard navigation and a floating panel.
//! - [`outside::OutsidePointer`]: the pointer-down hub a dropdown uses to close on outside presses.
//!   Create one per screen and pass every pointer event to it after the controls have seen it.
pub use panelkit_core::input;
pub use panelkit_core::keymap;
pub use panelkit_core::outside;
pub use panelkit_core::render;
pub use panelkit_core::theme;
pub use panelkit_core::viewport;

#[cfg(feature = "crossterm")]
pub use panelkit_core::crossterm_input;

pub mod dropdown;
pub mod error;

//! Terminal UI module using ratatui.
//!
//! - `render`: screen layout for sign-in, sign-up and the dashboard
//! - `input`: keyboard and mouse handling
//! - `styles`: color scheme and text styling
//! - `toasts`: the notification stack drawn over every screen

pub mod input;
pub mod render;
pub mod styles;
pub mod toasts;

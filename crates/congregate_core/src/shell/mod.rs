//! Application shell: composition root and the screen call surface.

pub mod app_shell;
pub mod screens;

mod action_queue;
mod actions;
mod event_loop;
mod views;

pub(crate) use actions::enter_app;
pub use event_loop::{run_app, viewport_width};

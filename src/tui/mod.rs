pub mod app;
mod panes;
pub mod runtime;
pub mod views;

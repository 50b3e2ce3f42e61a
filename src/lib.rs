pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod tui;


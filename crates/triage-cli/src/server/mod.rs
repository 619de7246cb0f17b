//! Local web server for reviewing records in the browser.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

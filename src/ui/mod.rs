/// UI module exports
mod bridge;
pub mod components;
pub mod dashboard;
pub mod popup;
pub mod selector;

/// Cloud Scout - browser extension popup for AWS and GCP at a glance
/// Built with Rust + WASM + Yew

pub mod catalog;
pub mod collation;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logs;
pub mod query;
pub mod recent;
pub mod selection;
pub mod storage;
pub mod ui;

pub use error::StoreError;
pub use recent::RecentSelectionStore;
pub use selection::{MAX_RECENT, PartitionedView, RecentList, SelectionItem};

use wasm_bindgen::prelude::*;

// Set up panic hook and logging before anything renders
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = config::AppConfig::default();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    log::debug!("Cloud Scout {} initialized", config.env.version);
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

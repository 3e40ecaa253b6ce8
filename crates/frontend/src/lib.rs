//! Simplify web UI - Yew WASM Frontend
//!
//! Resource list screens for the Simplify simulation backend.

mod api;
mod app;
mod components;
mod pages;
mod state;

pub use api::BrowserTransport;
pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    yew::Renderer::<App>::new().render();
}

#![allow(warnings)]
//! DIYDash Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod details;
mod error;
mod listing;
mod models;
mod store;
mod upload;
mod validation;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = Config::from_env();
    if let Err(e) = console_logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
    log::info!("DIYDash starting, API at {}", config.api_base_url);

    mount_to_body(App);
}

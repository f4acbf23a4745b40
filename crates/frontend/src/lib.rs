pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod search;
pub mod shared;

use leptos::prelude::*;
use shared::config::ClientConfig;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = ClientConfig::load();
    log::set_max_level(config.log_level().to_level_filter());
    log::debug!("client configuration: {:?}", config);

    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}

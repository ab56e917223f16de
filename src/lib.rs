//! Candlestick chart with click-placed stop-loss / take-profit markers and
//! risk/reward zones, compiled to WebAssembly.

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::{CONFIG_ELEMENT_ID, ChartConfig};
use crate::domain::errors::AppError;
use crate::domain::logging::{LogComponent, LogLevel};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;

/// Page config from the optional JSON `<script>` element.
fn read_page_config() -> Result<ChartConfig, AppError> {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID));
    match element {
        Some(element) => ChartConfig::from_json(&element.text_content().unwrap_or_default()),
        None => Ok(ChartConfig::default()),
    }
}

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    let page_config = read_page_config();
    let level = page_config.as_ref().ok().and_then(|c| c.log_level().ok()).unwrap_or(LogLevel::Debug);
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(level)));

    let config = page_config.unwrap_or_else(|e| {
        log_warn!(LogComponent::Presentation("Config"), "ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
        ChartConfig::default()
    });

    log_info!(
        LogComponent::Presentation("Initialize"),
        "starting with R:R {} and quote asset {}",
        config.risk_reward,
        config.binance.quote_asset
    );

    leptos::mount_to_body(move || leptos::view! { <App config=config /> });
}

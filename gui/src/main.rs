// GUI main entry point using Dioxus
#![allow(non_snake_case)]

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;

fn main() {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting appraisal dashboard (Dioxus Desktop)...");

    let app_config = match AppConfig::load_default() {
        Ok(cfg) => {
            tracing::info!(version = %cfg.version, endpoint = %cfg.engine.endpoint(), "Loaded default configuration");
            cfg
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load the embedded default configuration");
            std::process::exit(1);
        }
    };

    let desktop_config = DesktopConfig::default().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(1280.0, 800.0)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .launch(App);
}

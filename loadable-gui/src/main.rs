#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::new_without_default, clippy::type_complexity)]

mod artwork;
mod cmd;
mod data;
mod delegate;
mod ui;
mod widget;

use druid::AppLauncher;
use env_logger::{Builder, Env};
use loadable_core::notification::NotificationCenter;

use crate::{
    data::{AppState, Config},
    delegate::Delegate,
};

const ENV_LOG: &str = "LOADABLE_LOG";
const ENV_LOG_STYLE: &str = "LOADABLE_LOG_STYLE";

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    // Load configuration, writing out the defaults on first launch.
    let config = Config::load().unwrap_or_else(|| {
        let config = Config::default();
        if let Err(err) = config.save() {
            log::warn!("failed to save default config: {err}");
        }
        config
    });

    // Views and the delegate share one notification center, all of them live
    // on the UI thread.
    let center = NotificationCenter::new();
    let state = AppState::with_config(&config);
    let window = ui::main_window(&config, &center);

    AppLauncher::with_window(window)
        .configure_env(ui::theme::setup)
        .delegate(Delegate::new(center, config))
        .launch(state)
        .expect("Application launch");
}

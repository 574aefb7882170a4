#![allow(clippy::new_without_default)]

pub mod bitmap;
pub mod config;
pub mod error;
pub mod notification;
pub mod payload;
pub mod user_info;
pub mod view;

pub use url::Url;

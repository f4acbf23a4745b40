pub mod api_utils;
pub mod commands;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod dialogs;
pub mod download;
pub mod error;
pub mod format;
pub mod http;
pub mod icons;
pub mod list_state;
pub mod storage;

pub mod backend;
pub mod directory;
pub mod exporter;
pub mod handoff;
pub mod pager;
pub mod result_cache;
pub mod session;
pub mod ui;

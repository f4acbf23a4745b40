pub mod a001_saved_search;
pub mod a002_scheduled_input;
pub mod a003_lookup_file;
pub mod a004_load_job;

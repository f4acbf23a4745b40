pub mod directory_tree;
pub mod results_table;
pub mod search_page;

pub use search_page::SearchPage;

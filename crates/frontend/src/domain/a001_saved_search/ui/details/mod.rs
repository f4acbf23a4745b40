pub mod view;
pub mod view_model;

pub use view::{SaveSearchPage, SavedSearchDetails};
pub use view_model::FormTarget;

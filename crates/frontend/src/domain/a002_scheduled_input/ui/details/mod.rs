pub mod view;
pub mod view_model;

pub use view::ScheduledInputDetails;
pub use view_model::FormTarget;

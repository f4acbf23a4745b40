pub mod dropdown_menu;
pub mod form_field;
pub mod pagination_controls;

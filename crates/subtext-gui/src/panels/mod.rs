pub mod editor;
pub mod file_list;
mod helpers;
pub mod menu_bar;
pub mod status;
pub mod toolbar;
pub mod viewport;

pub mod action_indicator;
pub mod command_bar;
pub mod item_list;
pub mod project_menu;
pub mod text;

pub mod menu;
pub mod phrase_area;
pub mod pizza_timer;
pub mod result_panel;
pub mod status_bar;

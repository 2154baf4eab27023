pub mod details;
pub mod grid;
pub mod header;
pub mod legend;
pub mod statusbar;
pub mod toast;

pub mod grid_layout;

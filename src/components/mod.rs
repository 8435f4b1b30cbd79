pub mod build_driver;
pub mod edge_form;
pub mod graph_canvas;
pub mod path_panel;
pub mod prompt;

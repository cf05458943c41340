pub mod connector_layer;
pub mod list_view;
pub mod place_row;
pub mod window;

pub use window::MainWindow;

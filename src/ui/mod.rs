//! GTK display surface

mod panel_window;

pub use panel_window::{build_panel_window, FigureView};

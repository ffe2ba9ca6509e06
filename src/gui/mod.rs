pub mod app;
pub mod document_view;
pub mod theme;

pub use app::GuiApp;

pub mod app;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::{App, window_title};
pub use context::{AppContext, UiApp, build_app_context};

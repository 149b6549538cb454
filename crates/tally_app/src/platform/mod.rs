pub mod cli;

mod app;
mod document;
mod effects;
mod render;
mod watcher;

pub use app::run_app;

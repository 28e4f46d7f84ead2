// GUI（Dioxus desktop）

pub mod components;
pub mod hooks;
pub mod styles;
pub mod utils;

pub use components::MainWindow;

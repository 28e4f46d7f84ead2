// Dioxus UI コンポーネント
pub mod chat_screen;
pub mod header;
pub mod kpi_panel;
pub mod main_window;
pub mod vendor_card;

// Re-exports for convenience
pub use chat_screen::ChatScreen;
pub use header::Header;
pub use kpi_panel::KpiPanel;
pub use main_window::MainWindow;
pub use vendor_card::VendorCard;

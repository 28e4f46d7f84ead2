//! clmdash — ベンダー契約ダッシュボード + CLM Agent チャット
//!
//! 静的なベンダーカタログをダッシュボード表示し、ベンダーごとに
//! Gemini ストリーミングチャットのセッションを張るデスクトップアプリ。

pub mod api;
pub mod catalog;
pub mod chat;
pub mod gui;

pub use api::{GeminiClient, GeminiError};
pub use catalog::{find_vendor, vendors, Vendor, VendorStatus};
pub use chat::{Conversation, StreamEvent};
pub use gui::MainWindow;

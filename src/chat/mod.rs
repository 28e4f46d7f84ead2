// チャットコア（セッションファクトリ・ストリーミングアダプタ・会話状態）
pub mod conversation;
pub mod session;
pub mod stream;

pub use conversation::{ChatMessage, Conversation, MessageId, Role, APOLOGY_TEXT, UNAVAILABLE_TEXT};
pub use session::{create_vendor_session, ChatSession, StreamingChat, MODEL_ID};
pub use stream::{send_message_stream, StreamEvent};

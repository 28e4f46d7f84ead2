pub mod use_vendor_chat;

pub use use_vendor_chat::{use_vendor_chat, VendorChatHandle};

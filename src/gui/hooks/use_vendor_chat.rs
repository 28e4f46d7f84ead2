//! ベンダーチャット用カスタムフック
//!
//! マウント時にセッションを1つだけ生成し、挨拶メッセージを合成する。
//! 送信パスはガード付きで、ストリームイベントを会話状態へ流し込む。
//! ベンダー切替はビューの再マウントで表現され、セッションと会話は
//! まるごと破棄される（マージも引き継ぎもしない）。

use std::sync::Arc;

use dioxus::prelude::*;
use tokio::sync::Mutex;

use crate::catalog::Vendor;
use crate::chat::{
    create_vendor_session, send_message_stream, Conversation, StreamingChat, UNAVAILABLE_TEXT,
};

/// ベンダーチャットハンドル
#[derive(Clone, Copy)]
pub struct VendorChatHandle {
    pub conversation: Signal<Conversation>,
    pub is_loading: Signal<bool>,
    session: Signal<Option<Arc<Mutex<dyn StreamingChat>>>>,
}

impl VendorChatHandle {
    /// セッションが利用可能かどうか（構成エラー時はfalseのまま）
    pub fn session_ready(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn message_count(&self) -> usize {
        self.conversation.read().len()
    }

    /// ユーザーメッセージを送信する
    ///
    /// ガード: 空白のみの入力、セッション不在、ターン進行中はすべて
    /// 黙って無視する（エラー表示なし）。
    pub fn send(&self, text: impl Into<String>) {
        let text = text.into();
        let mut conversation = self.conversation;
        let mut is_loading = self.is_loading;

        if *is_loading.read() {
            tracing::debug!("⏭️ Send ignored: a turn is already in flight");
            return;
        }
        let Some(session) = self.session.read().clone() else {
            tracing::warn!("⚠️ Send ignored: no chat session for this vendor");
            return;
        };
        let Some(placeholder_id) = conversation.write().begin_turn(&text) else {
            return;
        };
        is_loading.set(true);

        spawn(async move {
            let mut rx = send_message_stream(session, text);
            // チャンク境界ごとにサスペンドし、UIイベントループをブロックしない
            while let Some(event) = rx.recv().await {
                conversation.write().apply_event(placeholder_id, event);
            }
            is_loading.set(false);
        });
    }
}

/// ベンダーチャットフック（マウントごとにセッション1つ）
pub fn use_vendor_chat(vendor: &Vendor) -> VendorChatHandle {
    let mut conversation = use_signal(Conversation::new);
    let is_loading = use_signal(|| false);
    let mut session = use_signal(|| None::<Arc<Mutex<dyn StreamingChat>>>);

    let vendor = vendor.clone();
    use_hook(move || {
        // セッション生成に成功した場合のみ挨拶を表示する。
        // 失敗（APIキー未設定など）はこのベンダーのチャットだけを無効化。
        match create_vendor_session(&vendor) {
            Ok(new_session) => {
                session.set(Some(
                    Arc::new(Mutex::new(new_session)) as Arc<Mutex<dyn StreamingChat>>
                ));
                conversation.write().greet(&vendor.name);
            }
            Err(e) => {
                tracing::error!("❌ Chat disabled for vendor '{}': {e}", vendor.name);
                conversation.write().push_model_notice(UNAVAILABLE_TEXT);
            }
        }
    });

    VendorChatHandle {
        conversation,
        is_loading,
        session,
    }
}

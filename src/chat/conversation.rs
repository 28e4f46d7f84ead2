//! 会話ステートマシン
//!
//! メッセージリストとターン進行（Idle → Sending → Streaming → Idle）を
//! 一箇所で管理する。リストは追記順のみで、並べ替え・削除は行わない。
//! ストリーミング中のプレースホルダはIDで特定してテキストをその場更新する。

use chrono::{DateTime, Utc};

use super::stream::StreamEvent;

/// ストリーム失敗時にユーザーへ表示する固定の謝罪メッセージ
pub const APOLOGY_TEXT: &str =
    "I'm sorry, I encountered an error reaching the assistant service. Please try again.";

/// セッション生成失敗時（構成エラー）の固定メッセージ
pub const UNAVAILABLE_TEXT: &str =
    "The AI assistant is currently unavailable for this vendor. Please check the configuration.";

/// メッセージID（タイムスタンプ由来、衝突時は単調に繰り上げ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct MessageId(pub i64);

/// メッセージの送り手
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// チャットメッセージ
///
/// テキストはストリーミング中のみ可変で、確定後は変更されない。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_streaming: bool,
}

impl ChatMessage {
    /// 表示用の時刻フォーマット
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// 1ベンダー選択ぶんの会話状態
///
/// `in_flight` が送信ガードを兼ねる: ストリーミング中のプレースホルダは
/// 常に高々1つで、完了またはエラーで解除されるまで新規ターンを拒否する。
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    in_flight: Option<MessageId>,
    last_id: i64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// ターンが進行中かどうか（送信ガード）
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 合成された挨拶メッセージを追加（リモートへは送信しない）
    pub fn greet(&mut self, vendor_name: &str) {
        let text = format!(
            "Hello! I'm your CLM Agent for **{vendor_name}**. \
             How can I help you with this contract today?"
        );
        self.push_model_notice(text);
    }

    /// 確定済みのシステム通知を追加（セッション生成失敗時など）
    pub fn push_model_notice(&mut self, text: impl Into<String>) {
        let id = self.next_id();
        self.messages.push(ChatMessage {
            id,
            role: Role::Model,
            text: text.into(),
            timestamp: Utc::now(),
            is_streaming: false,
        });
    }

    /// 新しいターンを開始する
    ///
    /// ユーザーメッセージ（入力そのまま）とストリーミング中プレースホルダの
    /// 2件を追加し、プレースホルダのIDを返す。空白のみの入力、または
    /// ターン進行中の二重送信は無視してNoneを返す。
    pub fn begin_turn(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            tracing::debug!("⏭️ Ignoring blank submission");
            return None;
        }
        if self.in_flight.is_some() {
            tracing::debug!("⏭️ Ignoring submission while a turn is in flight");
            return None;
        }

        let user_id = self.next_id();
        self.messages.push(ChatMessage {
            id: user_id,
            role: Role::User,
            text: text.to_string(),
            timestamp: Utc::now(),
            is_streaming: false,
        });

        let placeholder_id = self.next_id();
        self.messages.push(ChatMessage {
            id: placeholder_id,
            role: Role::Model,
            text: String::new(),
            timestamp: Utc::now(),
            is_streaming: true,
        });
        self.in_flight = Some(placeholder_id);

        tracing::info!("💬 Turn started (placeholder: {placeholder_id})");
        Some(placeholder_id)
    }

    /// ストリームイベントをプレースホルダへ適用する
    ///
    /// 対象IDが現在のin-flightと一致しない場合（ビュー破棄後の残響など）は
    /// 何もしない。Deltaは累積テキストの末尾伸長、Completedで確定、
    /// Failedは部分出力をすべて破棄して固定の謝罪文に置き換える。
    pub fn apply_event(&mut self, id: MessageId, event: StreamEvent) {
        if self.in_flight != Some(id) {
            tracing::debug!("⏭️ Stale stream event for {id} ignored");
            return;
        }

        match event {
            StreamEvent::Delta(chunk) => {
                if let Some(message) = self.streaming_message_mut(id) {
                    message.text.push_str(&chunk);
                }
            }
            StreamEvent::Completed => {
                if let Some(message) = self.streaming_message_mut(id) {
                    message.is_streaming = false;
                    tracing::info!("✅ Turn completed ({} chars)", message.text.len());
                }
                self.in_flight = None;
            }
            StreamEvent::Failed(reason) => {
                tracing::error!("❌ Stream failed, substituting apology: {reason}");
                if let Some(message) = self.streaming_message_mut(id) {
                    message.text.clear();
                    message.text.push_str(APOLOGY_TEXT);
                    message.is_streaming = false;
                }
                self.in_flight = None;
            }
        }
    }

    fn streaming_message_mut(&mut self, id: MessageId) -> Option<&mut ChatMessage> {
        self.messages
            .iter_mut()
            .find(|message| message.id == id && message.is_streaming)
    }

    /// タイムスタンプ由来のID。同一ミリ秒内の連続採番でも重複しないよう
    /// 直前のIDより必ず大きい値を返す。
    fn next_id(&mut self) -> MessageId {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        MessageId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut conversation = Conversation::new();
        conversation.greet("Honeywell");
        let id = conversation.begin_turn("hello").unwrap();
        conversation.apply_event(id, StreamEvent::Completed);
        let second = conversation.begin_turn("again").unwrap();

        let ids: Vec<_> = conversation.messages().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted, "ids must be unique and append-ordered");
        assert!(second > id);
    }

    #[test]
    fn test_display_time_format() {
        let mut conversation = Conversation::new();
        conversation.greet("SAP");
        let time = conversation.messages()[0].display_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }
}

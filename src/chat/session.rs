//! チャットセッションファクトリ
//!
//! ベンダー1選択につきセッション1つ。システムインストラクションは
//! 生成時に一度だけ組み立てられ、そのセッションの全ターンに適用される。
//! セッションはビューのアンマウントとともに破棄され、履歴は持ち越さない。

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::gemini::{
    shared_client, Content, GeminiClient, GeminiError, GenerateContentRequest,
};
use crate::catalog::Vendor;

/// 使用するモデル識別子
pub const MODEL_ID: &str = "gemini-2.5-flash";

/// ストリーミングチャットのシーム
///
/// テストではスクリプト化したフェイク実装に差し替える。
#[async_trait]
pub trait StreamingChat: Send {
    /// ユーザーメッセージを送信し、増分ごとにコールバックを呼ぶ。
    /// 戻り値は完全な応答テキスト。
    async fn stream_message(
        &mut self,
        text: &str,
        on_chunk: &mut (dyn FnMut(String) + Send),
    ) -> Result<String, GeminiError>;
}

/// リモート会話コンテキストへのハンドル
///
/// 履歴はセッション内にのみ保持され、成功したターンだけがコミットされる。
/// シリアライズも永続化もしない。
pub struct ChatSession {
    id: Uuid,
    client: Arc<GeminiClient>,
    system_instruction: Content,
    history: Vec<Content>,
}

impl ChatSession {
    fn new(client: Arc<GeminiClient>, vendor: &Vendor) -> Self {
        Self {
            id: Uuid::new_v4(),
            client,
            system_instruction: Content::system(build_system_instruction(vendor)),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// コミット済みターン数（user+model で1ターン2件）
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[async_trait]
impl StreamingChat for ChatSession {
    async fn stream_message(
        &mut self,
        text: &str,
        on_chunk: &mut (dyn FnMut(String) + Send),
    ) -> Result<String, GeminiError> {
        let mut contents = self.history.clone();
        contents.push(Content::user(text));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(self.system_instruction.clone()),
        };

        let full_text = self
            .client
            .stream_generate_content(MODEL_ID, &request, on_chunk)
            .await?;

        // 成功したターンのみ履歴にコミット（失敗ターンは次回に影響させない）
        self.history.push(Content::user(text));
        self.history.push(Content::model(full_text.clone()));

        Ok(full_text)
    }
}

/// ベンダーに紐づくセッションを生成する
///
/// 共有クライアントが構築できない場合（APIキー未設定）は構成エラー。
/// 呼び出し側はログに残してチャット機能を無効化する。リトライはしない。
pub fn create_vendor_session(vendor: &Vendor) -> Result<ChatSession, GeminiError> {
    let client = shared_client()?;
    let session = ChatSession::new(client, vendor);
    tracing::info!(
        "🤖 Chat session {} created for vendor '{}'",
        session.id,
        vendor.name
    );
    Ok(session)
}

/// ベンダー名とコンテキストブロブを埋め込んだシステムインストラクション
pub fn build_system_instruction(vendor: &Vendor) -> String {
    format!(
        "You are the CLM Agent, a specialized assistant for Contract Lifecycle Management.\n\
         You are currently assisting with the vendor: \"{name}\".\n\
         \n\
         Here is the specific context and contract data for this vendor:\n\
         ---\n\
         {context}\n\
         ---\n\
         \n\
         Your Role:\n\
         1. Answer questions about the contract, renewal dates, values, and risks based strictly on the provided context.\n\
         2. If asked to draft emails or letters, use a professional tone suitable for corporate legal/procurement communication.\n\
         3. If asked about spend, refer to the context or general business logic if specific numbers aren't in the text.\n\
         4. Be concise, helpful, and formatted cleanly.\n\
         5. Use Markdown for formatting lists, bold text, etc.",
        name = vendor.name,
        context = vendor.context_data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_system_instruction_embeds_vendor_context() {
        for vendor in catalog::vendors() {
            let instruction = build_system_instruction(vendor);
            assert!(instruction.contains(&vendor.name));
            assert!(instruction.contains(vendor.context_data.trim()));
        }
    }

    #[test]
    fn test_system_instruction_has_role_section() {
        let vendor = &catalog::vendors()[0];
        let instruction = build_system_instruction(vendor);
        assert!(instruction.contains("Your Role:"));
        assert!(instruction.contains("Markdown"));
    }
}

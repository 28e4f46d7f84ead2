//! ストリーミングアダプタ
//!
//! プロバイダの生レスポンスストリームを、UIが消費できるイベント列へ変換する。
//! 呼び出しごとに新しいシーケンスを生成し（再開不可・有限）、終端イベントは
//! Completed / Failed のどちらか一方のみ。Failedは部分的なDeltaの後に
//! 届くことがあり、その場合それまでの出力は破棄対象となる。

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use super::session::StreamingChat;

/// ストリームからUIへ届く増分イベント
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// 新しく利用可能になった応答テキストの断片（到着順に連結する）
    Delta(String),
    /// ターン正常完了
    Completed,
    /// トランスポート失敗（単一の終端エラー）
    Failed(String),
}

/// ユーザーメッセージを送信し、応答増分をチャネルで返す
///
/// プロデューサはバックグラウンドタスクとして走り、受信側がドロップされた
/// 場合（ベンダー切替によるビュー破棄）は送信が静かに失敗して残りの増分は
/// 適用されない。明示的なキャンセルシグナルは持たない。
pub fn send_message_stream(
    session: Arc<Mutex<dyn StreamingChat>>,
    text: String,
) -> mpsc::UnboundedReceiver<StreamEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut session = session.lock().await;

        let chunk_tx = tx.clone();
        let mut on_chunk = move |chunk: String| {
            let _ = chunk_tx.send(StreamEvent::Delta(chunk));
        };

        match session.stream_message(&text, &mut on_chunk).await {
            Ok(full_text) => {
                tracing::debug!("📨 Reply stream done ({} chars)", full_text.len());
                let _ = tx.send(StreamEvent::Completed);
            }
            Err(e) => {
                tracing::error!("❌ Reply stream failed: {e}");
                let _ = tx.send(StreamEvent::Failed(e.to_string()));
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gemini::GeminiError;
    use async_trait::async_trait;

    /// スクリプト通りに増分を流すフェイクセッション
    struct ScriptedChat {
        chunks: Vec<&'static str>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl StreamingChat for ScriptedChat {
        async fn stream_message(
            &mut self,
            _text: &str,
            on_chunk: &mut (dyn FnMut(String) + Send),
        ) -> Result<String, GeminiError> {
            let mut full = String::new();
            for (index, chunk) in self.chunks.iter().enumerate() {
                if self.fail_after == Some(index) {
                    return Err(GeminiError::Stream("connection reset".to_string()));
                }
                full.push_str(chunk);
                on_chunk((*chunk).to_string());
            }
            Ok(full)
        }
    }

    #[tokio::test]
    async fn test_stream_yields_deltas_then_completed() {
        let session: Arc<Mutex<dyn StreamingChat>> = Arc::new(Mutex::new(ScriptedChat {
            chunks: vec!["Hel", "lo"],
            fail_after: None,
        }));

        let mut rx = send_message_stream(session, "hi".to_string());
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hel".to_string()),
                StreamEvent::Delta("lo".to_string()),
                StreamEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_failure_is_single_terminal_event() {
        let session: Arc<Mutex<dyn StreamingChat>> = Arc::new(Mutex::new(ScriptedChat {
            chunks: vec!["Hel", "lo"],
            fail_after: Some(1),
        }));

        let mut rx = send_message_stream(session, "hi".to_string());
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], StreamEvent::Delta("Hel".to_string()));
        assert!(matches!(events[1], StreamEvent::Failed(_)));
    }

    #[tokio::test]
    async fn test_each_call_produces_fresh_sequence() {
        let session: Arc<Mutex<dyn StreamingChat>> = Arc::new(Mutex::new(ScriptedChat {
            chunks: vec!["A"],
            fail_after: None,
        }));

        for _ in 0..2 {
            let mut rx = send_message_stream(session.clone(), "hi".to_string());
            let mut events = Vec::new();
            while let Some(event) = rx.recv().await {
                events.push(event);
            }
            assert_eq!(
                events,
                vec![StreamEvent::Delta("A".to_string()), StreamEvent::Completed]
            );
        }
    }
}

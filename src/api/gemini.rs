//! Gemini REST APIクライアント
//!
//! `streamGenerateContent?alt=sse` によるストリーミング生成に対応。
//! HTTPクライアントはプロセス内で再利用され、認証キーは環境変数
//! `GEMINI_API_KEY` から一度だけ読み込む。

use std::sync::{Arc, OnceLock};

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

/// APIキーを読み込む環境変数名
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// デフォルトのAPIエンドポイント
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(thiserror::Error, Debug)]
pub enum GeminiError {
    #[error("API key not configured: set the {API_KEY_ENV} environment variable")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Stream ended unexpectedly: {0}")]
    Stream(String),
}

/// APIキー（ログ・Debug出力では必ず伏せ字にする）
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// --- ワイヤ型 (Gemini REST) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// システムインストラクションはrole無しのContentとして送る
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// レスポンスチャンクから新規テキストを取り出す
pub fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .map(|part| part.text.as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// --- SSEデコード ---

/// Server-Sent Eventsのインクリメンタルデコーダ
///
/// バイトストリームの断片を跨いで `data:` 行を復元する。
/// イベント境界は空行（LF・CRLFどちらの改行も可）。マルチバイト文字が
/// 断片境界で割れても壊れないよう、バッファはバイト列で保持し
/// イベント完成時にのみUTF-8変換する。
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受信した断片を追加し、完成したイベントのdataペイロードを返す
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some((boundary, delimiter_len)) = find_event_boundary(&self.buffer) {
            let raw_event: Vec<u8> = self.buffer.drain(..boundary + delimiter_len).collect();
            if let Some(payload) = parse_event(&String::from_utf8_lossy(&raw_event)) {
                events.push(payload);
            }
        }

        events
    }

    /// ストリーム終端で、終端空行のないまま残ったイベントを回収する
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let raw_event = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        parse_event(&raw_event)
    }
}

/// 空行（イベント境界）の位置と区切りのバイト長を返す
fn find_event_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    for position in 0..buffer.len() {
        let rest = &buffer[position..];
        if rest.starts_with(b"\r\n\r\n") {
            return Some((position, 4));
        }
        if rest.starts_with(b"\n\n") {
            return Some((position, 2));
        }
    }
    None
}

/// 1イベント分のテキストからdataペイロードを取り出す
///
/// コメント行 (":...") やイベント名行は無視。改行スタイルは
/// 区別せず、CRLF行の末尾 `\r` はここで落とす。
fn parse_event(raw_event: &str) -> Option<String> {
    let mut data_lines = Vec::new();
    for line in raw_event.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(data) = line.strip_prefix("data:") {
            data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
        }
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Geminiクライアント（reqwestクライアントを内包、Clone可）
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 環境変数からクライアントを構築
    ///
    /// キー未設定は致命的な構成エラー。呼び出し側でログに残し、
    /// 当該機能を無効化する（リトライはしない）。
    pub fn from_env() -> Result<Self, GeminiError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| GeminiError::MissingApiKey)?;
        if key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }
        Ok(Self::new(ApiKey::new(key)))
    }

    /// ストリーミング生成を実行し、テキスト増分ごとにコールバックを呼ぶ
    ///
    /// 戻り値は到着順に連結した完全な応答テキスト。途中でトランスポートが
    /// 失敗した場合、そこまでの増分は呼び出し側で破棄される前提。
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        on_chunk: &mut (dyn FnMut(String) + Send),
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        );

        tracing::debug!("📡 POST {url} (contents: {})", request.contents.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let mut byte_stream = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut full_text = String::new();

        while let Some(bytes) = byte_stream.next().await {
            let bytes = bytes?;
            for payload in decoder.push(&bytes) {
                let parsed: GenerateContentResponse = serde_json::from_str(&payload)?;
                if let Some(text) = extract_text(&parsed) {
                    full_text.push_str(&text);
                    on_chunk(text);
                }
            }
        }

        // 終端空行なしで接続が閉じた場合、最後のイベントを取りこぼさない
        if let Some(payload) = decoder.finish() {
            let parsed: GenerateContentResponse = serde_json::from_str(&payload)?;
            if let Some(text) = extract_text(&parsed) {
                full_text.push_str(&text);
                on_chunk(text);
            }
        }

        tracing::debug!("✅ Stream finished: {} chars total", full_text.len());
        Ok(full_text)
    }
}

/// プロセス共有のGeminiクライアント（遅延初期化・再利用）
static SHARED_CLIENT: OnceLock<Arc<GeminiClient>> = OnceLock::new();

/// 共有クライアントを取得（初回のみ環境変数から構築）
pub fn shared_client() -> Result<Arc<GeminiClient>, GeminiError> {
    if let Some(client) = SHARED_CLIENT.get() {
        return Ok(client.clone());
    }
    let client = Arc::new(GeminiClient::from_env()?);
    Ok(SHARED_CLIENT.get_or_init(|| client).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret-key");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_sse_decoder_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"a\":1}\n\n");
        assert_eq!(events, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn test_sse_decoder_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"tex").is_empty());
        assert!(decoder.push(b"t\":\"Hel\"}").is_empty());
        let events = decoder.push(b"\n\ndata: {\"text\":\"lo\"}\n\n");
        assert_eq!(
            events,
            vec![
                "{\"text\":\"Hel\"}".to_string(),
                "{\"text\":\"lo\"}".to_string()
            ]
        );
    }

    #[test]
    fn test_sse_decoder_multibyte_split() {
        // 「契」(3バイト) をチャンク境界で分割しても化けないこと
        let payload = "data: 契約\n\n".as_bytes();
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(&payload[..8]).is_empty());
        let events = decoder.push(&payload[8..]);
        assert_eq!(events, vec!["契約".to_string()]);
    }

    #[test]
    fn test_sse_decoder_ignores_comments_and_event_names() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b": keep-alive\nevent: message\ndata: payload\n\n");
        assert_eq!(events, vec!["payload".to_string()]);
    }

    #[test]
    fn test_sse_decoder_crlf_delimited_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"a\":1}\r\n\r\n");
        assert_eq!(events, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn test_sse_decoder_crlf_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"text\":\"Hel\"}\r").is_empty());
        assert!(decoder.push(b"\n\r").is_empty());
        let events = decoder.push(b"\ndata: {\"text\":\"lo\"}\r\n\r\n");
        assert_eq!(
            events,
            vec![
                "{\"text\":\"Hel\"}".to_string(),
                "{\"text\":\"lo\"}".to_string()
            ]
        );
    }

    #[test]
    fn test_sse_decoder_finish_recovers_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        // 回収後のバッファは空で、finishは冪等
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_sse_decoder_finish_strips_trailing_cr() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail\r").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
    }

    #[test]
    fn test_sse_decoder_finish_empty_buffer() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_extract_text_from_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response), Some("Hello".to_string()));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hi")],
            system_instruction: Some(Content::system("be brief")),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("systemInstruction"));
        assert!(!json.contains("system_instruction"));
    }
}

// GUI用ユーティリティ関数

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログ初期化
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    subscriber.try_init()?;

    Ok(())
}

/// 1行を `**` 区切りで (テキスト, 太字か) のセグメント列へ分解する
/// （軽量マークダウン表示用）
pub fn bold_segments(line: &str) -> Vec<(String, bool)> {
    let mut segments = Vec::new();
    let mut bold = false;
    for part in line.split("**") {
        if !part.is_empty() {
            segments.push((part.to_string(), bold));
        }
        bold = !bold;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_segments_inline() {
        let segments = bold_segments("for **Honeywell**. Next");
        assert_eq!(
            segments,
            vec![
                ("for ".to_string(), false),
                ("Honeywell".to_string(), true),
                (". Next".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_bold_segments_whole_line() {
        assert_eq!(
            bold_segments("**Contract Status**"),
            vec![("Contract Status".to_string(), true)]
        );
    }

    #[test]
    fn test_bold_segments_plain() {
        assert_eq!(
            bold_segments("no markers"),
            vec![("no markers".to_string(), false)]
        );
    }
}

//! テーマとスタイルヘルパー

use crate::catalog::{KpiIcon, KpiStatus, VendorStatus};
use crate::chat::Role;

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const APP: &'static str = "app";
    pub const MAIN_CONTENT: &'static str = "main-content";

    // ヘッダー
    pub const APP_HEADER: &'static str = "app-header";
    pub const APP_TITLE: &'static str = "app-title";
    pub const APP_SUBTITLE: &'static str = "app-subtitle";
    pub const HOME_BUTTON: &'static str = "home-button";

    // ダッシュボード
    pub const DASHBOARD: &'static str = "dashboard";
    pub const DASHBOARD_INTRO: &'static str = "dashboard-intro";
    pub const VENDOR_GRID: &'static str = "vendor-grid";
    pub const VENDOR_CARD: &'static str = "vendor-card";
    pub const VENDOR_LOGO: &'static str = "vendor-logo";
    pub const VENDOR_META: &'static str = "vendor-meta";
    pub const STATUS_BADGE: &'static str = "status-badge";
    pub const SPEND_BARS: &'static str = "spend-bars";
    pub const SPEND_BAR: &'static str = "spend-bar";

    // チャット画面
    pub const CHAT_SCREEN: &'static str = "chat-screen";
    pub const CHAT_TOPBAR: &'static str = "chat-topbar";
    pub const CHAT_BODY: &'static str = "chat-body";
    pub const CHAT_PANE: &'static str = "chat-pane";
    pub const MESSAGE_LIST: &'static str = "message-list";
    pub const CHAT_MESSAGE: &'static str = "chat-message";
    pub const MESSAGE_BUBBLE: &'static str = "message-bubble";
    pub const MESSAGE_FOOTER: &'static str = "message-footer";
    pub const TYPING_DOTS: &'static str = "typing-dots";
    pub const SUGGESTIONS: &'static str = "suggestions";
    pub const SUGGESTION_CHIP: &'static str = "suggestion-chip";
    pub const INPUT_AREA: &'static str = "input-area";
    pub const CHAT_INPUT: &'static str = "chat-input";
    pub const SEND_BUTTON: &'static str = "send-button";
    pub const BACK_BUTTON: &'static str = "back-button";

    // KPIパネル
    pub const KPI_PANEL: &'static str = "kpi-panel";
    pub const KPI_CARD: &'static str = "kpi-card";
    pub const KPI_LABEL: &'static str = "kpi-label";
    pub const KPI_VALUE: &'static str = "kpi-value";
    pub const KPI_TREND: &'static str = "kpi-trend";
}

/// メッセージリストのDOM要素ID（自動スクロール対象）
pub const MESSAGE_LIST_DOM_ID: &str = "message-list";

/// ベンダーステータスのバッジ用クラス
pub fn get_status_badge_class(status: VendorStatus) -> String {
    let modifier = match status {
        VendorStatus::Active => "active",
        VendorStatus::AtRisk => "at-risk",
        VendorStatus::RenewalDue => "renewal-due",
    };
    format!("{} {}", CssClasses::STATUS_BADGE, modifier)
}

/// KPIステータスのカード用クラス
pub fn get_kpi_status_class(status: KpiStatus) -> String {
    format!("kpi-status {}", status.as_str())
}

/// メッセージ送り手ごとのバブルクラス
pub fn get_message_class(role: Role) -> String {
    let modifier = match role {
        Role::User => "user",
        Role::Model => "model",
    };
    format!("{} {}", CssClasses::CHAT_MESSAGE, modifier)
}

/// KPIアイコンのグリフ
pub fn kpi_icon_glyph(icon: Option<KpiIcon>) -> &'static str {
    match icon {
        Some(KpiIcon::Chart) => "📊",
        Some(KpiIcon::Shield) => "🛡️",
        Some(KpiIcon::Dollar) => "💲",
        Some(KpiIcon::File) => "📄",
        None => "•",
    }
}

/// document headへ注入する埋め込みCSS
pub fn get_embedded_css() -> &'static str {
    r#"
    * { box-sizing: border-box; }
    body { margin: 0; }

    .app {
        min-height: 100vh;
        display: flex;
        flex-direction: column;
        background: #f8fafc;
        color: #1e293b;
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    }

    .app-header {
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 14px 28px;
        background: #ffffff;
        border-bottom: 1px solid #e2e8f0;
    }
    .app-title { margin: 0; font-size: 1.25rem; font-weight: 700; }
    .app-subtitle { margin: 0; font-size: 0.8rem; color: #64748b; }
    .home-button {
        padding: 8px 16px;
        border: 1px solid #cbd5e1;
        border-radius: 8px;
        background: #ffffff;
        cursor: pointer;
        font-size: 0.85rem;
    }
    .home-button:hover { background: #f1f5f9; }

    .main-content { flex: 1; display: flex; flex-direction: column; overflow: hidden; }

    .dashboard { max-width: 960px; margin: 0 auto; padding: 40px 24px; width: 100%; overflow-y: auto; }
    .dashboard-intro { text-align: center; margin-bottom: 32px; }
    .dashboard-intro h2 { font-size: 2rem; margin: 0 0 8px 0; }
    .dashboard-intro p { color: #64748b; margin: 0; }

    .vendor-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(340px, 1fr));
        gap: 24px;
    }
    .vendor-card {
        background: #ffffff;
        border: 1px solid #e2e8f0;
        border-radius: 14px;
        padding: 20px;
        cursor: pointer;
        transition: box-shadow 0.2s ease;
    }
    .vendor-card:hover { box-shadow: 0 8px 24px rgba(15, 23, 42, 0.08); }
    .vendor-logo {
        width: 44px;
        height: 44px;
        border-radius: 10px;
        background: #1e293b;
        color: #ffffff;
        display: flex;
        align-items: center;
        justify-content: center;
        font-weight: 700;
    }
    .vendor-meta { display: flex; justify-content: space-between; font-size: 0.85rem; color: #475569; margin-top: 10px; }

    .status-badge {
        display: inline-block;
        padding: 3px 10px;
        border-radius: 999px;
        font-size: 0.7rem;
        font-weight: 700;
        text-transform: uppercase;
        letter-spacing: 0.04em;
    }
    .status-badge.active { background: #ccfbf1; color: #0f766e; }
    .status-badge.at-risk { background: #fee2e2; color: #b91c1c; }
    .status-badge.renewal-due { background: #fef3c7; color: #b45309; }

    .spend-bars { display: flex; align-items: flex-end; gap: 4px; height: 48px; margin-top: 14px; }
    .spend-bar { flex: 1; background: #99f6e4; border-radius: 3px 3px 0 0; }

    .chat-screen { flex: 1; display: flex; flex-direction: column; overflow: hidden; background: #ffffff; }
    .chat-topbar {
        display: flex;
        align-items: center;
        gap: 14px;
        padding: 12px 20px;
        border-bottom: 1px solid #e2e8f0;
    }
    .back-button {
        border: none;
        background: transparent;
        font-size: 1.1rem;
        cursor: pointer;
        padding: 6px 10px;
        border-radius: 8px;
    }
    .back-button:hover { background: #f1f5f9; }

    .chat-body { flex: 1; display: flex; overflow: hidden; }
    .chat-pane { flex: 1; display: flex; flex-direction: column; min-width: 0; border-right: 1px solid #e2e8f0; }

    .message-list { flex: 1; overflow-y: auto; padding: 20px; display: flex; flex-direction: column; gap: 14px; background: #f8fafc; }
    .chat-message { display: flex; }
    .chat-message.user { justify-content: flex-end; }
    .chat-message.model { justify-content: flex-start; }
    .message-bubble {
        max-width: 85%;
        border-radius: 16px;
        padding: 12px 16px;
        font-size: 0.9rem;
        line-height: 1.5;
    }
    .chat-message.user .message-bubble { background: #7c3aed; color: #ffffff; border-bottom-right-radius: 4px; }
    .chat-message.model .message-bubble { background: #ffffff; border: 1px solid #e2e8f0; border-bottom-left-radius: 4px; }
    .message-bubble p { margin: 0 0 4px 0; min-height: 1rem; }
    .message-footer { margin-top: 6px; font-size: 0.65rem; color: #94a3b8; text-transform: uppercase; letter-spacing: 0.05em; display: flex; justify-content: space-between; gap: 16px; }

    .typing-dots { display: inline-flex; gap: 4px; margin-top: 6px; }
    .typing-dots span {
        width: 6px; height: 6px; border-radius: 50%; background: currentColor;
        opacity: 0.6; animation: bounce 1s infinite;
    }
    .typing-dots span:nth-child(2) { animation-delay: 0.15s; }
    .typing-dots span:nth-child(3) { animation-delay: 0.3s; }
    @keyframes bounce { 0%, 80%, 100% { transform: translateY(0); } 40% { transform: translateY(-4px); } }

    .suggestions { display: flex; gap: 8px; padding: 10px 20px; border-top: 1px solid #f1f5f9; overflow-x: auto; }
    .suggestion-chip {
        padding: 6px 12px;
        border: 1px solid #ddd6fe;
        color: #6d28d9;
        background: #ffffff;
        border-radius: 999px;
        font-size: 0.75rem;
        white-space: nowrap;
        cursor: pointer;
    }
    .suggestion-chip:hover { background: #f5f3ff; }

    .input-area { display: flex; gap: 10px; padding: 14px 20px; border-top: 1px solid #e2e8f0; }
    .chat-input {
        flex: 1;
        padding: 12px 14px;
        border: 1px solid #e2e8f0;
        border-radius: 12px;
        background: #f8fafc;
        font-size: 0.9rem;
        outline: none;
    }
    .chat-input:focus { background: #ffffff; border-color: #7c3aed; }
    .send-button {
        padding: 0 18px;
        border: none;
        border-radius: 10px;
        background: #7c3aed;
        color: #ffffff;
        font-weight: 600;
        cursor: pointer;
    }
    .send-button:disabled { opacity: 0.5; cursor: default; }

    .kpi-panel { width: 340px; padding: 20px; overflow-y: auto; background: #f8fafc; }
    .kpi-panel h3 { margin: 0 0 16px 0; font-size: 1rem; }
    .kpi-card {
        background: #ffffff;
        border: 1px solid #e2e8f0;
        border-radius: 12px;
        padding: 16px;
        margin-bottom: 12px;
    }
    .kpi-label { display: flex; align-items: center; gap: 6px; font-size: 0.8rem; color: #64748b; font-weight: 600; }
    .kpi-value { font-size: 1.4rem; font-weight: 700; margin-top: 8px; }
    .kpi-trend { font-size: 0.75rem; font-weight: 600; }
    .kpi-trend.up { color: #16a34a; }
    .kpi-trend.down { color: #dc2626; }

    .kpi-status { float: right; padding: 2px 8px; border-radius: 6px; font-size: 0.65rem; font-weight: 700; text-transform: uppercase; }
    .kpi-status.good { background: #ccfbf1; color: #0f766e; }
    .kpi-status.warning { background: #fef3c7; color: #b45309; }
    .kpi-status.danger { background: #fee2e2; color: #b91c1c; }
    .kpi-status.neutral { background: #f1f5f9; color: #475569; }
    "#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badge_classes() {
        assert_eq!(
            get_status_badge_class(VendorStatus::AtRisk),
            "status-badge at-risk"
        );
        assert_eq!(
            get_status_badge_class(VendorStatus::Active),
            "status-badge active"
        );
    }

    #[test]
    fn test_message_classes() {
        assert_eq!(get_message_class(Role::User), "chat-message user");
        assert_eq!(get_message_class(Role::Model), "chat-message model");
    }

    #[test]
    fn test_embedded_css_covers_core_classes() {
        let css = get_embedded_css();
        for class in [
            CssClasses::VENDOR_CARD,
            CssClasses::MESSAGE_LIST,
            CssClasses::KPI_PANEL,
            CssClasses::SUGGESTION_CHIP,
        ] {
            assert!(css.contains(&format!(".{class}")), "missing .{class}");
        }
    }
}

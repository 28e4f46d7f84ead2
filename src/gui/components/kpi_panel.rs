use dioxus::prelude::*;

use crate::catalog::Kpi;
use crate::gui::styles::theme::{get_kpi_status_class, kpi_icon_glyph, CssClasses};

/// トレンド文字列を矢印付きの表示用文字列とクラス修飾子へ変換する。
/// 先頭が `-` なら下降（down）、それ以外は上昇（up）として扱う。
fn format_trend(trend: &str) -> (String, &'static str) {
    if trend.starts_with('-') {
        (format!("↓ {trend}"), "down")
    } else {
        (format!("↑ {trend}"), "up")
    }
}

/// チャット画面右側のKPIサイドパネル
#[component]
pub fn KpiPanel(kpis: Vec<Kpi>) -> Element {
    // (表示テキスト, トレンド行) を事前に組み立てておく
    let cards: Vec<(Kpi, Option<(String, &'static str)>)> = kpis
        .iter()
        .map(|kpi| {
            let trend = kpi.trend.as_deref().map(format_trend);
            (kpi.clone(), trend)
        })
        .collect();

    rsx! {
        div {
            class: CssClasses::KPI_PANEL,

            h3 {
                style: "margin: 0 0 12px 0; font-size: 0.95rem;",
                "Contract Health"
            }

            for (kpi, trend) in cards.iter() {
                div {
                    class: CssClasses::KPI_CARD,
                    key: "{kpi.id}",

                    div {
                        class: CssClasses::KPI_LABEL,
                        span { "{kpi_icon_glyph(kpi.icon)} {kpi.label}" }
                        span {
                            class: get_kpi_status_class(kpi.status),
                        }
                    }
                    div {
                        class: CssClasses::KPI_VALUE,
                        "{kpi.value}"
                    }
                    if let Some((text, direction)) = trend {
                        div {
                            class: "{CssClasses::KPI_TREND} {direction}",
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}

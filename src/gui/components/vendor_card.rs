use dioxus::prelude::*;

use crate::catalog::Vendor;
use crate::gui::styles::theme::{get_status_badge_class, CssClasses};

/// 支出バーの高さ（%）を計算。最大値を100%として正規化する。
fn bar_height_percent(amount: u32, max_amount: u32) -> u32 {
    if max_amount == 0 {
        0
    } else {
        amount * 100 / max_amount
    }
}

/// ダッシュボード上のベンダーカード
#[component]
pub fn VendorCard(vendor: Vendor, on_select: EventHandler<Vendor>) -> Element {
    let max_amount = vendor
        .spend_data
        .iter()
        .map(|point| point.amount)
        .max()
        .unwrap_or(0);

    let bars: Vec<(String, u32)> = vendor
        .spend_data
        .iter()
        .map(|point| {
            (
                format!("{}: {}", point.month, point.amount),
                bar_height_percent(point.amount, max_amount),
            )
        })
        .collect();

    let card_vendor = vendor.clone();

    rsx! {
        div {
            class: CssClasses::VENDOR_CARD,
            onclick: move |_| on_select.call(card_vendor.clone()),

            div {
                style: "display: flex; align-items: center; gap: 12px;",

                div {
                    class: CssClasses::VENDOR_LOGO,
                    "{vendor.logo_initials}"
                }
                div {
                    style: "flex: 1;",
                    h3 {
                        style: "margin: 0 0 4px 0;",
                        "{vendor.name}"
                    }
                    span {
                        class: get_status_badge_class(vendor.status),
                        "{vendor.status.label()}"
                    }
                }
            }

            p {
                style: "color: #64748b; font-size: 0.85rem; margin: 12px 0 0 0;",
                "{vendor.description}"
            }

            div {
                class: CssClasses::VENDOR_META,
                span { "💰 {vendor.contract_value}" }
                span { "📅 Renewal: {vendor.renewal_date}" }
            }

            // 月次支出のミニバーチャート（フィクスチャデータの表示のみ）
            div {
                class: CssClasses::SPEND_BARS,
                for (tooltip, height) in bars.iter() {
                    div {
                        class: CssClasses::SPEND_BAR,
                        title: "{tooltip}",
                        style: "height: {height}%;",
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height_percent() {
        assert_eq!(bar_height_percent(550, 550), 100);
        assert_eq!(bar_height_percent(480, 550), 87);
        assert_eq!(bar_height_percent(0, 550), 0);
        assert_eq!(bar_height_percent(100, 0), 0);
    }
}

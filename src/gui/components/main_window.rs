use dioxus::prelude::*;

use crate::catalog::{vendors, Vendor};
use crate::gui::components::chat_screen::ChatScreen;
use crate::gui::components::header::Header;
use crate::gui::components::vendor_card::VendorCard;
use crate::gui::styles::theme::{get_embedded_css, CssClasses};

/// アプリのルートコンポーネント
///
/// 画面はダッシュボードとチャットの2状態のみ。チャット画面は
/// ベンダーIDをkeyにして再マウントさせ、切替ごとに会話と
/// セッションをまるごと作り直す。
#[component]
pub fn MainWindow() -> Element {
    let mut selected_vendor = use_signal(|| None::<Vendor>);

    let selection = selected_vendor.read().clone();

    rsx! {
        document::Style { {get_embedded_css()} }

        div {
            class: CssClasses::APP,

            Header {
                show_home: selection.is_some(),
                on_home: move |_| selected_vendor.set(None),
            }

            main {
                class: CssClasses::MAIN_CONTENT,

                {match selection {
                    Some(vendor) => rsx! {
                        ChatScreen {
                            key: "{vendor.id}",
                            vendor: vendor.clone(),
                            on_back: move |_| selected_vendor.set(None),
                        }
                    },
                    None => rsx! {
                        div {
                            class: CssClasses::DASHBOARD,

                            div {
                                class: CssClasses::DASHBOARD_INTRO,
                                h2 {
                                    style: "margin: 0 0 4px 0;",
                                    "Vendor Portfolio"
                                }
                                p {
                                    style: "margin: 0; color: #64748b;",
                                    "Select a vendor to review its contract with the CLM Agent."
                                }
                            }

                            div {
                                class: CssClasses::VENDOR_GRID,
                                for vendor in vendors().iter() {
                                    VendorCard {
                                        key: "{vendor.id}",
                                        vendor: vendor.clone(),
                                        on_select: move |picked: Vendor| {
                                            tracing::info!("🗂️ Vendor selected: {}", picked.name);
                                            selected_vendor.set(Some(picked));
                                        },
                                    }
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}

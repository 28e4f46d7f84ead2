use dioxus::prelude::*;

use crate::gui::styles::theme::CssClasses;

/// アプリヘッダー（ベンダー選択中のみホームボタンを表示）
#[component]
pub fn Header(show_home: bool, on_home: EventHandler<()>) -> Element {
    rsx! {
        header {
            class: CssClasses::APP_HEADER,

            div {
                h1 {
                    class: CssClasses::APP_TITLE,
                    "📑 clmdash"
                }
                p {
                    class: CssClasses::APP_SUBTITLE,
                    "Vendor Contract Dashboard & CLM Agent"
                }
            }

            if show_home {
                button {
                    class: CssClasses::HOME_BUTTON,
                    onclick: move |_| on_home.call(()),
                    "← Dashboard"
                }
            }
        }
    }
}

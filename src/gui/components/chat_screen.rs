use dioxus::prelude::*;

use crate::catalog::{Vendor, SUGGESTED_PROMPTS};
use crate::chat::{ChatMessage, Role};
use crate::gui::components::kpi_panel::KpiPanel;
use crate::gui::hooks::use_vendor_chat;
use crate::gui::styles::theme::{get_message_class, CssClasses, MESSAGE_LIST_DOM_ID};
use crate::gui::utils::bold_segments;

/// ベンダー1社分のチャット画面（左: 会話、右: KPIパネル）
///
/// ベンダー切替は親側のkey付き再マウントで表現されるため、
/// このコンポーネント自身は単一ベンダーの生涯のみを扱う。
#[component]
pub fn ChatScreen(vendor: Vendor, on_back: EventHandler<()>) -> Element {
    let handle = use_vendor_chat(&vendor);
    let mut input = use_signal(String::new);

    // 会話シグナルへの書き込み（新規メッセージ・ストリーミング中の追記とも）
    // ごとに再実行され、リスト末尾へスクロールする。readは購読確立のため。
    let conversation = handle.conversation;
    use_effect(move || {
        let _subscribe = conversation.read().messages().len();
        spawn(async move {
            let _ = document::eval(&format!(
                "const el = document.getElementById('{MESSAGE_LIST_DOM_ID}'); if (el) {{ el.scrollTop = el.scrollHeight; }}"
            ))
            .await;
        });
    });

    let try_send = move |mut input: Signal<String>| {
        let text = input.read().clone();
        if text.trim().is_empty() || *handle.is_loading.read() || !handle.session_ready() {
            return;
        }
        handle.send(text);
        input.set(String::new());
    };

    let messages: Vec<ChatMessage> = handle.conversation.read().messages().to_vec();
    let show_suggestions = messages.len() < 3 && handle.session_ready();
    let is_loading = *handle.is_loading.read();

    rsx! {
        div {
            class: CssClasses::CHAT_SCREEN,

            div {
                class: CssClasses::CHAT_TOPBAR,
                button {
                    class: CssClasses::BACK_BUTTON,
                    onclick: move |_| on_back.call(()),
                    "← Back"
                }
                div {
                    class: CssClasses::VENDOR_LOGO,
                    "{vendor.logo_initials}"
                }
                div {
                    h2 {
                        style: "margin: 0; font-size: 1.05rem;",
                        "{vendor.name}"
                    }
                    span {
                        style: "color: #64748b; font-size: 0.8rem;",
                        "📄 {vendor.contract_file_name}"
                    }
                }
            }

            div {
                class: CssClasses::CHAT_BODY,

                div {
                    class: CssClasses::CHAT_PANE,

                    div {
                        class: CssClasses::MESSAGE_LIST,
                        id: MESSAGE_LIST_DOM_ID,
                        for message in messages.iter() {
                            MessageBubble {
                                key: "{message.id}",
                                message: message.clone(),
                            }
                        }
                    }

                    if show_suggestions {
                        div {
                            class: CssClasses::SUGGESTIONS,
                            for prompt in SUGGESTED_PROMPTS.iter() {
                                button {
                                    class: CssClasses::SUGGESTION_CHIP,
                                    onclick: move |_| handle.send(*prompt),
                                    "{prompt}"
                                }
                            }
                        }
                    }

                    div {
                        class: CssClasses::INPUT_AREA,
                        input {
                            class: CssClasses::CHAT_INPUT,
                            r#type: "text",
                            placeholder: "Ask about this contract...",
                            value: "{input}",
                            oninput: move |event| input.set(event.value()),
                            onkeydown: move |event| {
                                if event.key() == Key::Enter {
                                    try_send(input);
                                }
                            },
                        }
                        button {
                            class: CssClasses::SEND_BUTTON,
                            disabled: is_loading,
                            onclick: move |_| try_send(input),
                            "Send"
                        }
                    }
                }

                KpiPanel { kpis: vendor.kpis.clone() }
            }
        }
    }
}

/// メッセージ1件のバブル表示
#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let lines: Vec<String> = message.text.lines().map(str::to_string).collect();
    let show_typing = message.is_streaming && message.text.is_empty();
    let show_footer = message.role == Role::Model && !message.is_streaming;
    let time = message.display_time();

    rsx! {
        div {
            class: get_message_class(message.role),

            div {
                class: CssClasses::MESSAGE_BUBBLE,

                if show_typing {
                    span {
                        class: CssClasses::TYPING_DOTS,
                        span {}
                        span {}
                        span {}
                    }
                } else {
                    for (index, line) in lines.iter().enumerate() {
                        p {
                            key: "{index}",
                            style: "margin: 0;",
                            for (text, bold) in bold_segments(line) {
                                if bold {
                                    strong { "{text}" }
                                } else {
                                    span { "{text}" }
                                }
                            }
                        }
                    }
                }

                if show_footer {
                    div {
                        class: CssClasses::MESSAGE_FOOTER,
                        "CLM Agent · {time}"
                    }
                }
            }
        }
    }
}

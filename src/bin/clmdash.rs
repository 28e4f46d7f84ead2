use anyhow::Result;
use clmdash::gui::{components::MainWindow, utils};
use dioxus::prelude::*;

/// clmdash デスクトップアプリのルート
fn app() -> Element {
    rsx! {
        div {
            style: "
                height: 100vh;
                margin: 0;
                padding: 0;
                overflow: hidden;
                background: #f0f2f5;
                font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            ",

            MainWindow {}
        }
    }
}

fn main() -> Result<()> {
    utils::init_logging()?;

    tracing::info!("🎬 Starting clmdash - Vendor Contract Dashboard");
    tracing::debug!("📱 Starting Dioxus desktop application...");

    // Dioxusが内部でtokioランタイムを管理するため、tokio::mainは不要
    dioxus::launch(app);

    tracing::info!("👋 clmdash shutting down");
    Ok(())
}

use crate::bot::keyboards::dataset_keyboard;
use crate::bot::utils::{banner, escape_html, fmt_expiry};
use crate::AppState;
use anyhow::Result as AnyhowResult;
use std::path::Path;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, ParseMode};
use tracing::{error, info};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let tg_id = from.id.0 as i64;

    // Admin dataset upload arrives as a plain document message.
    if let Some(doc) = msg.document() {
        handle_upload(&bot, &msg, tg_id, doc, &state).await;
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };
    info!("Received message: {:?}", text);

    let mut parts = text.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(());
    };
    let cmd = cmd.split('@').next().unwrap_or(cmd);
    let arg = parts.next();

    match cmd {
        "/start" => {
            let _ = bot
                .send_message(
                    msg.chat.id,
                    format!(
                        "{}🚀 <b>Welcome to Stash Hub!</b>\n\n\
                        🔑 Use <code>/key &lt;access_key&gt;</code> to unlock drops.\n\
                        📂 Use /generate once unlocked.\n\n\
                        🧠 /help lists every command.",
                        banner()
                    ),
                )
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/help" => {
            let _ = bot
                .send_message(
                    msg.chat.id,
                    format!(
                        "{}🧠 <b>Help Menu</b>\n\n\
                        🚀 /start - Welcome message\n\
                        🔑 <code>/key &lt;access_key&gt;</code> - Unlock access\n\
                        📂 /generate - Open the database menu\n\
                        🛡 /listaccess - Admin: view users\n\
                        ❌ <code>/revoke &lt;user_id&gt;</code> - Admin: revoke a user\n\
                        🎯 <code>/genkey &lt;time&gt;</code> - Admin: generate a key\n\
                        📤 /uploadfile - Admin: upload new database files",
                        banner()
                    ),
                )
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/genkey" => {
            let reply = match state.key_service.issue(tg_id, arg.unwrap_or_default()).await {
                Ok(issued) => format!(
                    "{}🎯 <b>Key generated:</b> <code>{}</code>\n📅 Valid for: {}",
                    banner(),
                    issued.key,
                    escape_html(arg.unwrap_or_default())
                ),
                Err(stash_core::Error::PermissionDenied) => {
                    format!("{}❌ <b>Admin only!</b>", banner())
                }
                Err(stash_core::Error::InvalidArgument(_)) => format!(
                    "{}⚠️ Usage: <code>/genkey &lt;time&gt;</code> (e.g. 30s, 5m, 12h, 7d or lifetime)",
                    banner()
                ),
                Err(e) => {
                    error!("Key generation failed: {}", e);
                    format!("{}⚠️ {}", banner(), escape_html(&e.to_string()))
                }
            };
            let _ = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/key" => {
            let Some(key) = arg else {
                let _ = bot
                    .send_message(
                        msg.chat.id,
                        format!("{}⚠️ Usage: <code>/key &lt;access_key&gt;</code>", banner()),
                    )
                    .parse_mode(ParseMode::Html)
                    .await;
                return Ok(());
            };
            let reply = match state.key_service.redeem(key, tg_id).await {
                Ok(_) => format!("{}✅ <b>Access granted!</b>", banner()),
                Err(stash_core::Error::Expired) => {
                    format!("{}❌ <b>Key expired!</b>", banner())
                }
                Err(stash_core::Error::NotFound(_)) => {
                    format!("{}❌ <b>Invalid or used key!</b>", banner())
                }
                Err(e) => {
                    error!("Key redemption failed: {}", e);
                    format!("{}⚠️ {}", banner(), escape_html(&e.to_string()))
                }
            };
            let _ = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/generate" => {
            if !state.access_service.has_access(tg_id).await {
                let _ = bot
                    .send_message(
                        msg.chat.id,
                        format!(
                            "{}🔒 <b>Access denied!</b> Use <code>/key &lt;access_key&gt;</code> first.",
                            banner()
                        ),
                    )
                    .parse_mode(ParseMode::Html)
                    .await;
                return Ok(());
            }
            let names = state.drop_service.dataset_names().await;
            if names.is_empty() {
                let _ = bot
                    .send_message(
                        msg.chat.id,
                        format!("{}🚫 No databases available yet.", banner()),
                    )
                    .parse_mode(ParseMode::Html)
                    .await;
            } else {
                let _ = bot
                    .send_message(msg.chat.id, format!("{}📂 <b>Select a database:</b>", banner()))
                    .parse_mode(ParseMode::Html)
                    .reply_markup(dataset_keyboard(&names))
                    .await;
            }
        }

        "/listaccess" => {
            let reply = match state.access_service.list(tg_id).await {
                Ok(entries) => {
                    let mut text = format!("{}📋 <b>Active users:</b>\n\n", banner());
                    if entries.is_empty() {
                        text.push_str("🚫 No users found.");
                    } else {
                        for (user_id, expires_at) in entries {
                            text.push_str(&format!(
                                "👤 <code>{}</code> ➔ {}\n",
                                user_id,
                                fmt_expiry(expires_at)
                            ));
                        }
                    }
                    text
                }
                Err(stash_core::Error::PermissionDenied) => {
                    format!("{}❌ <b>Admin only!</b>", banner())
                }
                Err(e) => {
                    error!("Listing access failed: {}", e);
                    format!("{}⚠️ {}", banner(), escape_html(&e.to_string()))
                }
            };
            let _ = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/revoke" => {
            let user_id = match arg.map(str::parse::<i64>) {
                Some(Ok(user_id)) => user_id,
                _ => {
                    let reply = if state.admin_service.is_admin(tg_id) {
                        format!("{}⚠️ Usage: <code>/revoke &lt;user_id&gt;</code>", banner())
                    } else {
                        format!("{}❌ <b>Admin only!</b>", banner())
                    };
                    let _ = bot
                        .send_message(msg.chat.id, reply)
                        .parse_mode(ParseMode::Html)
                        .await;
                    return Ok(());
                }
            };
            let reply = match state.access_service.revoke(tg_id, user_id).await {
                Ok(()) => format!(
                    "{}✅ Access revoked for <code>{}</code>",
                    banner(),
                    user_id
                ),
                Err(stash_core::Error::PermissionDenied) => {
                    format!("{}❌ <b>Admin only!</b>", banner())
                }
                Err(stash_core::Error::NotFound(_)) => format!(
                    "{}❌ User <code>{}</code> not found!",
                    banner(),
                    user_id
                ),
                Err(e) => {
                    error!("Revoke failed: {}", e);
                    format!("{}⚠️ {}", banner(), escape_html(&e.to_string()))
                }
            };
            let _ = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await;
        }

        "/uploadfile" => {
            let reply = if state.admin_service.is_admin(tg_id) {
                format!(
                    "{}📤 Send a <code>.txt</code> file as a document and it will be added to the catalog.",
                    banner()
                )
            } else {
                format!("{}❌ <b>Admin only!</b>", banner())
            };
            let _ = bot
                .send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .await;
        }

        _ => {}
    }

    Ok(())
}

async fn handle_upload(bot: &Bot, msg: &Message, tg_id: i64, doc: &Document, state: &AppState) {
    if !state.admin_service.is_admin(tg_id) {
        let _ = bot
            .send_message(msg.chat.id, format!("{}❌ <b>Admin only!</b>", banner()))
            .parse_mode(ParseMode::Html)
            .await;
        return;
    }

    let Some(file_name) = doc.file_name.as_deref() else {
        let _ = bot
            .send_message(
                msg.chat.id,
                format!("{}⚠️ The document needs a file name.", banner()),
            )
            .parse_mode(ParseMode::Html)
            .await;
        return;
    };

    let reply = match save_upload(bot, state, tg_id, doc, file_name).await {
        Ok(saved_name) => format!(
            "{}✅ <b>Uploaded:</b> <code>{}</code>",
            banner(),
            escape_html(&saved_name)
        ),
        Err(e) => {
            error!("Dataset upload failed: {}", e);
            format!("{}❌ Upload failed: {}", banner(), escape_html(&e.to_string()))
        }
    };
    let _ = bot
        .send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await;
}

/// Downloads the document into the dataset directory and registers it under
/// its filename stem.
async fn save_upload(
    bot: &Bot,
    state: &AppState,
    tg_id: i64,
    doc: &Document,
    file_name: &str,
) -> AnyhowResult<String> {
    // Only the final path component; a crafted name must not escape the
    // dataset directory.
    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("unusable file name"))?;
    let stem = Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("unusable file name"))?
        .to_string();

    let dest = state.drop_service.database_dir().join(base);
    let file = bot.get_file(doc.file.id.clone()).await?;
    let mut out = tokio::fs::File::create(&dest).await?;
    bot.download_file(&file.path, &mut out).await?;

    state.drop_service.register(tg_id, &stem, dest).await?;
    Ok(base.to_string())
}

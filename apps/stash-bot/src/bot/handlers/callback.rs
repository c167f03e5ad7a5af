use crate::bot::utils::{banner, escape_html};
use crate::AppState;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use tracing::{error, info};

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    info!("Received callback: {:?}", q.data);
    let callback_id = q.id.clone();
    let tg_id = q.from.id.0 as i64;

    let Some(data) = q.data else {
        return Ok(());
    };

    if let Some(dataset) = data.strip_prefix("drop:") {
        // Access can lapse between opening the menu and pressing a button.
        if !state.access_service.has_access(tg_id).await {
            let _ = bot
                .answer_callback_query(callback_id)
                .text("🔒 Access expired. Redeem a new key with /key.")
                .show_alert(true)
                .await;
            return Ok(());
        }

        match state.drop_service.generate(tg_id, dataset).await {
            Ok(artifact) => {
                let _ = bot.answer_callback_query(callback_id).await;
                let Some(src) = q.message else {
                    return Ok(());
                };
                let chat_id = src.chat().id;

                let _ = bot
                    .edit_message_text(
                        chat_id,
                        src.id(),
                        format!("{}🔄 <b>Connecting to the database...</b>", banner()),
                    )
                    .parse_mode(ParseMode::Html)
                    .await;
                if state.drop_delay_secs > 0 {
                    tokio::time::sleep(std::time::Duration::from_secs(state.drop_delay_secs))
                        .await;
                }

                let _ = bot
                    .send_document(chat_id, InputFile::file(artifact))
                    .caption(format!(
                        "{}✅ Here is your <code>{}</code> drop!",
                        banner(),
                        escape_html(dataset)
                    ))
                    .parse_mode(ParseMode::Html)
                    .await
                    .map_err(|e| error!("Failed to deliver drop: {}", e));
            }

            Err(stash_core::Error::RateLimited { retry_after_secs }) => {
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(format!(
                        "⏳ Please wait {retry_after_secs}s before generating again."
                    ))
                    .show_alert(true)
                    .await;
            }

            Err(stash_core::Error::NotFound(_)) => {
                let _ = bot.answer_callback_query(callback_id).await;
                if let Some(src) = q.message {
                    let _ = bot
                        .edit_message_text(
                            src.chat().id,
                            src.id(),
                            format!(
                                "{}❌ Database <code>{}</code> not found!",
                                banner(),
                                escape_html(dataset)
                            ),
                        )
                        .parse_mode(ParseMode::Html)
                        .await;
                }
            }

            Err(e) => {
                error!("Drop generation failed: {}", e);
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text("⚠️ Drop generation failed, try again later.")
                    .show_alert(true)
                    .await;
            }
        }
    }

    Ok(())
}

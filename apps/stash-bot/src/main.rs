use dotenvy::dotenv;
use teloxide::prelude::*;

use std::env;
use std::fs;
use std::path::PathBuf;

mod bot;
mod services;
mod state;

use crate::services::access_service::AccessService;
use crate::services::admin_service::AdminService;
use crate::services::drop_service::DropService;
use crate::services::key_service::KeyService;
use crate::state::AppState;
use stash_core::{AccessStore, DatasetCatalog};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    log::info!("Starting Stash Hub bot...");

    let token = env::var("BOT_TOKEN").expect("BOT_TOKEN is not set");
    let admin_id: i64 = env::var("ADMIN_ID")
        .expect("ADMIN_ID is not set")
        .parse()
        .expect("ADMIN_ID must be a numeric Telegram id");

    let database_dir =
        PathBuf::from(env::var("DATABASE_DIR").unwrap_or_else(|_| "database".to_string()));
    let access_file =
        PathBuf::from(env::var("ACCESS_FILE").unwrap_or_else(|_| "access.json".to_string()));
    let drops_dir =
        PathBuf::from(env::var("USER_DROPS_DIR").unwrap_or_else(|_| "userdrops".to_string()));
    let cooldown_secs = env_u64("COOLDOWN_SECONDS", 10);
    let sample_size = env_u64("DROP_SAMPLE_SIZE", 100) as usize;
    let drop_delay_secs = env_u64("DROP_DELAY_SECS", 0);

    fs::create_dir_all(&database_dir).expect("failed to create dataset directory");
    fs::create_dir_all(&drops_dir).expect("failed to create drops directory");

    let catalog = DatasetCatalog::scan(&database_dir).expect("failed to scan dataset directory");

    let admin_service = AdminService::new(admin_id);
    let access_service = AccessService::load(AccessStore::new(access_file), admin_service.clone())
        .expect("failed to load access ledger");
    let key_service = KeyService::new(access_service.clone(), admin_service.clone());
    let drop_service = DropService::new(
        catalog,
        admin_service.clone(),
        database_dir,
        drops_dir,
        cooldown_secs,
        sample_size,
    );

    let state = AppState {
        admin_service,
        access_service,
        key_service,
        drop_service,
        drop_delay_secs,
    };

    let bot = Bot::new(token);

    let (_tx, rx) = tokio::sync::broadcast::channel(1);

    bot::run_bot(bot, rx, state).await;
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

//! Jobwire Bot
//!
//! Announces new job listings from the Adzuna search API into a Discord
//! channel and answers on-demand `!jobs` lookups.
//!
//! Architecture:
//! - Configuration: environment variables (with `.env` support)
//! - Store: Postgres table of already-announced job ids
//! - Announcer: fetch, dedup-filter, render, deliver
//! - Discord: gateway event handling and the scheduled cycle
//! - Health: liveness endpoint for the hosting platform

mod announcer;
mod config;
mod db;
mod discord;
mod health;
mod store;

use anyhow::{Context, Result};
use serenity::client::Client;
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::store::PostedJobsStore;
use jobwire_client::AdzunaClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobwire_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    info!("Starting Jobwire Bot");

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;
    info!(
        "Loaded configuration: channel_id={}, announce interval={:?}",
        config.channel_id, config.announce_interval
    );

    // Initialize the dedup store
    let pool = db::create_pool(&config.database_url)
        .await
        .context("failed to create database pool")?;

    let store = Arc::new(PostedJobsStore::new(pool.clone()));
    store
        .ensure_schema()
        .await
        .context("failed to initialize the posted_jobs table")?;

    info!("Dedup store initialized");

    // Liveness endpoint for the hosting platform
    let health_addr = config.health_bind_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = health::serve(&health_addr).await {
            error!("Liveness endpoint failed: {:#}", e);
        }
    });

    // Job-search client
    let source = Arc::new(AdzunaClient::new(
        config.adzuna_api_url.clone(),
        config.app_id.clone(),
        config.app_key.clone(),
    ));

    info!("Job-search client initialized");

    // Discord gateway client
    let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let handler = discord::Handler::new(config.clone(), source, Arc::clone(&store));

    let mut client = Client::builder(&config.bot_token, intents)
        .event_handler(handler)
        .await
        .context("failed to build Discord client")?;

    // Shut the gateway down cleanly on ctrl-c so the pool can be closed
    // before exit.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutdown signal received, stopping gateway shards");
        shard_manager.shutdown_all().await;
    });

    if let Err(e) = client.start().await {
        error!("Discord client error: {:#}", e);
    }

    // Gateway is down; release the persistence handle.
    pool.close().await;
    info!("Database pool closed, exiting");

    Ok(())
}

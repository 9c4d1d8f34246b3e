//! Discord gateway integration
//!
//! One event handler covers both triggers: `ready` starts the scheduled
//! announcement loop (once, however many times the gateway reconnects),
//! and `message` dispatches the `!jobs` command. The two command arities
//! from the original product are modeled as a single command with an
//! optional location argument.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context as AnyhowContext;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use tokio::time;
use tracing::{error, info};

use crate::announcer::{self, MessageSink};
use crate::config::Config;
use crate::store::PostedJobsStore;
use jobwire_client::AdzunaClient;

/// Command prefix users type in chat
pub const COMMAND: &str = "!jobs";

/// Parse a message into the jobs command.
///
/// Returns `None` when the message is not the command at all,
/// `Some(None)` for the bare command, and `Some(Some(location))` when a
/// free-text location follows.
pub fn parse_jobs_command(content: &str) -> Option<Option<&str>> {
    let rest = content.strip_prefix(COMMAND)?;

    if rest.is_empty() {
        return Some(None);
    }

    // Reject things like "!jobsearch" that merely share the prefix.
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let location = rest.trim();
    if location.is_empty() {
        Some(None)
    } else {
        Some(Some(location))
    }
}

/// Message sink that posts into one Discord channel
pub struct DiscordSink {
    http: Arc<Http>,
    channel: ChannelId,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, channel: ChannelId) -> Self {
        Self { http, channel }
    }
}

#[async_trait]
impl MessageSink for DiscordSink {
    async fn send(&self, content: &str) -> anyhow::Result<()> {
        self.channel
            .say(&self.http, content)
            .await
            .context("failed to deliver message to Discord")?;
        Ok(())
    }
}

/// Gateway event handler owning the fetch client and the dedup store
pub struct Handler {
    config: Config,
    source: Arc<AdzunaClient>,
    store: Arc<PostedJobsStore>,
    announce_started: AtomicBool,
}

impl Handler {
    pub fn new(config: Config, source: Arc<AdzunaClient>, store: Arc<PostedJobsStore>) -> Self {
        Self {
            config,
            source,
            store,
            announce_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);

        // ready fires again on reconnect; only the first one starts the loop.
        if self.announce_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let channel = ChannelId::new(self.config.channel_id);
        let interval = self.config.announce_interval;
        let http = Arc::clone(&ctx.http);

        info!("Starting announcement loop (interval: {:?})", interval);

        tokio::spawn(async move {
            // The first tick fires immediately, so a fresh start announces
            // right away instead of waiting a full period.
            let mut ticker = time::interval(interval);

            loop {
                ticker.tick().await;

                let sink = DiscordSink::new(Arc::clone(&http), channel);
                match announcer::announce_new_jobs(source.as_ref(), store.as_ref(), &sink).await {
                    Ok(posted) => {
                        if posted > 0 {
                            info!("Announced {} new job listing(s)", posted);
                        }
                    }
                    Err(e) => error!("Scheduled announcement cycle failed: {:#}", e),
                }
            }
        });
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(argument) = parse_jobs_command(&msg.content) else {
            return;
        };

        let sink = DiscordSink::new(Arc::clone(&ctx.http), msg.channel_id);

        let result = match argument {
            None => {
                announcer::run_jobs_command(self.source.as_ref(), self.store.as_ref(), &sink).await
            }
            Some(location) => {
                announcer::run_location_command(self.source.as_ref(), &sink, location).await
            }
        };

        if let Err(e) = result {
            error!("Command handling failed: {:#}", e);
        }
    }
}

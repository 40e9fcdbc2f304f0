//! Discord process: poise framework setup, gateway events and shutdown.

mod commands;
mod paginate;

use poise::serenity_prelude as serenity;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::embed::Embed;
use crate::error::RabotError;
use crate::fetch::Fetcher;
use crate::cogs::faqs;

/// Shared state handed to every command.
pub struct Data {
    pub config: Config,
    pub fetcher: Fetcher,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Reply used when a command fails without a more specific message.
pub const GENERIC_FAILURE: &str = "The command did not succeed.";

// ── run ──────────────────────────────────────────────────────────────────────

/// Connect to Discord and serve until `shutdown` is cancelled or the gateway
/// connection ends.
pub async fn run(config: Config, fetcher: Fetcher, shutdown: CancellationToken) -> Result<(), RabotError> {
    let token = config.require_token()?.to_string();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            event_handler: |ctx, event, framework, data| Box::pin(event_handler(ctx, event, framework, data)),
            on_error: |error| Box::pin(on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    debug!(command = %ctx.command().name, user = %ctx.author().name, "command received");
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(count = framework.options().commands.len(), "slash commands registered");
                Ok(Data { config, fetcher })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .map_err(|e| RabotError::Discord(format!("failed to build client: {e}")))?;

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        biased;

        _ = shutdown.cancelled() => {
            info!("shutdown signal received, closing gateway connection");
            shard_manager.shutdown_all().await;
        }
        result = client.start() => {
            result.map_err(|e| RabotError::Discord(e.to_string()))?;
            warn!("gateway connection closed");
        }
    }

    Ok(())
}

// ── Events ───────────────────────────────────────────────────────────────────

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(user = %data_about_bot.user.name, "Bot is ready!");
        }
        serenity::FullEvent::Message { new_message } => {
            if new_message.author.id == framework.bot_id {
                return Ok(());
            }
            on_message(ctx, new_message).await?;
        }
        _ => {}
    }
    Ok(())
}

async fn on_message(ctx: &serenity::Context, message: &serenity::Message) -> Result<(), Error> {
    let Some(response) = faqs::handle_message(&message.content) else {
        return Ok(());
    };
    debug!(channel = %message.channel_id, "answering faq");

    message
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(to_serenity_embed(&response.content)))
        .await?;

    if response.delete_starting_message {
        if let Err(e) = message.delete(&ctx.http).await {
            warn!(error = %e, "Bot lacks permission to delete messages.");
        }
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, %error, "command failed");
            if let Err(e) = ctx.say(GENERIC_FAILURE).await {
                error!(error = %e, "failed to report command failure");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "error while handling framework error");
            }
        }
    }
}

// ── Conversion ───────────────────────────────────────────────────────────────

pub(crate) fn to_serenity_embed(embed: &Embed) -> serenity::CreateEmbed {
    let mut out = serenity::CreateEmbed::new().description(embed.description.as_str());
    if !embed.title.is_empty() {
        out = out.title(embed.title.as_str());
    }
    if let Some(url) = &embed.url {
        out = out.url(url.as_str());
    }
    if let Some(color) = embed.color {
        out = out.colour(color);
    }
    if let Some(footer) = &embed.footer {
        out = out.footer(serenity::CreateEmbedFooter::new(footer.as_str()));
    }
    out
}

use crate::config::Config;
use crate::errors::{on_error, Error};
use poise::serenity_prelude::{self as serenity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod colour;
mod config;
mod dice;
mod errors;
mod prefix;
mod reply;

// User data, which is stored and accessible in all command invocations
pub(crate) struct Data {
    prefix: String,
}
type Context<'a> = poise::Context<'a, Data, Error>;

/// Show what this bot can do
#[poise::command(slash_command)]
async fn help(
    ctx: Context<'_>,
    #[description = "Command to get help for"] command: Option<String>,
) -> Result<(), Error> {
    let prefix = &ctx.data().prefix;
    let extra = format!("You can also type `{prefix}roll [die] [count]`, e.g. `{prefix}roll d6 3`");
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: &extra,
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!("{} is online", data_about_bot.user.name);
        }
        serenity::FullEvent::Message { new_message } => {
            prefix::handle_message(ctx, new_message, data).await?;
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dndbot=info,serenity=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Config {
        token,
        prefix,
        guild_id,
    } = Config::from_env()?;

    // reading the text command needs the privileged message content intent
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![dice::roll(), help()],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                        tracing::info!(
                            "Registered {} commands in guild {guild_id}",
                            commands.len()
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        tracing::info!("Registered {} commands globally", commands.len());
                    }
                }
                Ok(Data { prefix })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

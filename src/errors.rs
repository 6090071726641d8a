use super::Data;
use crate::{serenity, Context};
use poise::FrameworkError;
use thiserror::Error as ThisError;

/// Standard type for errors
pub(crate) type Error = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while interpreting or performing a roll.
/// These are always reported back to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub(crate) enum DiceError {
    #[error("`{0}` is not a valid number")]
    InvalidNumericToken(String),
    #[error("A die needs at least one side, and `{0}` is not a usable die size")]
    InvalidDieSize(i64),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

/// Build the red embed we use for every user-facing error
pub(crate) fn error_embed(message: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .colour(serenity::Colour::RED)
        .title("Error")
        .description(message)
}

/// Custom error handler.
/// We implement custom handling for some errors and forward the rest onto the default handler.
/// Currently we have custom handling for [`FrameworkError::Setup`], [`FrameworkError::Command`]
/// and [`FrameworkError::UnknownInteraction`].
pub(crate) async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {error:?}"),
        FrameworkError::Command { error, ctx, .. } => send_error_message(ctx, error).await,
        FrameworkError::UnknownInteraction {
            ctx, interaction, ..
        } => reply_unknown_interaction(ctx, interaction).await,
        error => delegate_to_default_handler(error).await,
    }
}

/// Send an error message to Discord in response to a command
async fn send_error_message(ctx: Context<'_>, error: Error) {
    tracing::warn!("Error in command `{}`: {:?}", ctx.command().name, error);
    if let Err(e) = ctx
        .send(poise::CreateReply::default().embed(error_embed(error.to_string())))
        .await
    {
        tracing::error!("Error while reporting error: {e}");
    }
}

/// Slash commands we don't know about still get an answer rather than a failed interaction
async fn reply_unknown_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::CommandInteraction,
) {
    let content = unknown_command_content(&interaction.data.name);
    tracing::warn!("{content}");
    let response = serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new().content(content),
    );
    if let Err(e) = interaction.create_response(ctx, response).await {
        tracing::error!("Error while reporting unknown command: {e}");
    }
}

fn unknown_command_content(name: &str) -> String {
    format!("Error: {}", DiceError::UnknownCommand(name.to_string()))
}

// Delegate to poise and log an error if that fails
async fn delegate_to_default_handler(error: FrameworkError<'_, Data, Error>) {
    if let Err(e) = poise::builtins::on_error(error).await {
        tracing::error!("Error while handling error: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_message_names_the_token() {
        let error = DiceError::InvalidNumericToken("abc".to_string());
        assert!(error.to_string().contains("abc"));
    }

    #[test]
    fn unknown_command_message_names_the_command() {
        let error = DiceError::UnknownCommand("flip".to_string());
        assert_eq!(error.to_string(), "unknown command 'flip'");
    }

    #[test]
    fn unknown_slash_command_reply() {
        assert_eq!(
            unknown_command_content("initiative"),
            "Error: unknown command 'initiative'"
        );
    }

    #[test]
    fn dice_errors_lift_into_boxed_error() {
        fn fails() -> Result<(), Error> {
            Err(DiceError::InvalidDieSize(0))?;
            Ok(())
        }
        let error = fails().unwrap_err();
        assert!(error.to_string().contains('0'));
    }
}

//! The text form of the roll command, e.g. `!roll d6 3`.
//! Discord only delivers message content to bots with the message content intent.

use super::errors::{error_embed, DiceError, Error};
use super::Data;
use crate::dice::RollRequest;
use crate::reply::{display_name, RollReply};
use crate::serenity;
use std::num::{IntErrorKind, ParseIntError};

/// Name of the only text command we answer to
pub(crate) const COMMAND: &str = "roll";

/// Parse `{prefix}roll [die] [count]`.
///
/// Returns `Ok(None)` for messages that aren't a prefixed command at all.
/// The die may be written `6` or `d6`; anything after the count is ignored.
pub(crate) fn parse_text_command(
    content: &str,
    prefix: &str,
) -> Result<Option<RollRequest>, DiceError> {
    let Some(rest) = content.trim_start().strip_prefix(prefix) else {
        return Ok(None);
    };
    // a bare prefix, or a prefix followed by a space, is just chatter
    if rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }

    let mut tokens = rest.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    if !name.eq_ignore_ascii_case(COMMAND) {
        return Err(DiceError::UnknownCommand(name.to_string()));
    }

    let die_size = tokens.next().map(parse_die).transpose()?;
    let count = tokens.next().map(parse_number).transpose()?;
    Ok(Some(RollRequest::new(die_size, count)))
}

fn parse_die(token: &str) -> Result<i64, DiceError> {
    let sides = token.strip_prefix(['d', 'D']).unwrap_or(token);
    parse_number(sides).map_err(|_| DiceError::InvalidNumericToken(token.to_string()))
}

/// Integers too big for an `i64` still count as numbers, so they saturate and get clamped later
fn parse_number(token: &str) -> Result<i64, DiceError> {
    token.parse().or_else(|error: ParseIntError| match error.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(DiceError::InvalidNumericToken(token.to_string())),
    })
}

/// Answer a message if it is a text roll command
pub(crate) async fn handle_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    // never answer other bots, including ourselves
    if message.author.bot {
        return Ok(());
    }

    let outcome = parse_text_command(&message.content, &data.prefix)
        .and_then(|request| request.map(|request| request.roll()).transpose());

    let result = match outcome {
        Ok(Some(result)) => result,
        Ok(None) => return Ok(()),
        Err(error) => {
            tracing::warn!(channel = %message.channel_id, "{error}");
            message
                .channel_id
                .send_message(
                    ctx,
                    serenity::CreateMessage::new().embed(error_embed(error.to_string())),
                )
                .await?;
            return Ok(());
        }
    };

    let nick = message
        .member
        .as_ref()
        .and_then(|member| member.nick.as_deref());
    let name = display_name(nick, &message.author.name);
    let avatar_url = message.author.avatar_url().unwrap_or_default();
    let reply = RollReply::new(&result, &name, avatar_url, message.channel_id);

    tracing::info!(
        channel = %reply.channel_id,
        total = result.total,
        "{}",
        reply.author_line
    );
    reply.send(ctx).await
}

use crate::dice::RollResult;
use crate::errors::Error;
use crate::serenity::{
    CacheHttp, ChannelId, Colour, CreateEmbed, CreateEmbedAuthor, CreateMessage,
};

/// Guild nickname if there is one, otherwise the account name
pub(crate) fn display_name(nick: Option<&str>, username: &str) -> String {
    nick.filter(|nick| !nick.is_empty())
        .unwrap_or(username)
        .to_string()
}

/// Everything we send back for a roll, independent of how it was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RollReply {
    pub(crate) channel_id: ChannelId,
    pub(crate) author_line: String,
    pub(crate) avatar_url: String,
    pub(crate) description: String,
    pub(crate) colour: u32,
    /// Only present when more than one die was rolled
    pub(crate) total_field: Option<String>,
}

impl RollReply {
    pub(crate) fn new(
        result: &RollResult,
        name: &str,
        avatar_url: String,
        channel_id: ChannelId,
    ) -> Self {
        let count = result.count();
        RollReply {
            channel_id,
            author_line: format!("{name} rolled {count}d{}", result.die_size),
            avatar_url,
            description: result.to_string(),
            colour: result.colour.packed(),
            total_field: (count > 1).then(|| result.total.to_string()),
        }
    }

    /// Convert a [`RollReply`] to a [`CreateEmbed`]
    pub(crate) fn create_embed(&self) -> CreateEmbed {
        let mut author = CreateEmbedAuthor::new(&self.author_line);
        if !self.avatar_url.is_empty() {
            author = author.icon_url(&self.avatar_url);
        }

        let embed = CreateEmbed::default()
            .author(author)
            .description(&self.description)
            .colour(Colour::new(self.colour));

        match &self.total_field {
            Some(total) => embed.field("Total", total, false),
            None => embed,
        }
    }

    /// Post the reply as a fresh message in its channel
    pub(crate) async fn send(&self, cache_http: impl CacheHttp) -> Result<(), Error> {
        self.channel_id
            .send_message(cache_http, CreateMessage::new().embed(self.create_embed()))
            .await?;
        Ok(())
    }
}

use crate::serenity::GuildId;
use thiserror::Error;

/// Prefix for text commands when `DICE_PREFIX` is unset
pub(crate) const DEFAULT_PREFIX: &str = "!";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid {name}: `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Settings read from the environment at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) token: String,
    pub(crate) prefix: String,
    /// Register commands in this guild only, which takes effect immediately.
    /// Without it commands are registered globally.
    pub(crate) guild_id: Option<GuildId>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let prefix = match lookup("DICE_PREFIX") {
            None => DEFAULT_PREFIX.to_string(),
            Some(prefix) if prefix.is_empty() || prefix.contains(char::is_whitespace) => {
                return Err(ConfigError::Invalid {
                    name: "DICE_PREFIX",
                    value: prefix,
                })
            }
            Some(prefix) => prefix,
        };

        let guild_id = lookup("GUILD_ID")
            .map(|value| match value.parse::<u64>() {
                Ok(id) if id != 0 => Ok(GuildId::new(id)),
                _ => Err(ConfigError::Invalid {
                    name: "GUILD_ID",
                    value,
                }),
            })
            .transpose()?;

        Ok(Config {
            token,
            prefix,
            guild_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("DISCORD_TOKEN")));
        assert_eq!(
            load(&[("DISCORD_TOKEN", "")]),
            Err(ConfigError::Missing("DISCORD_TOKEN"))
        );
    }

    #[test]
    fn defaults() {
        let config = load(&[("DISCORD_TOKEN", "secret")]).unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.prefix, "!");
        assert_eq!(config.guild_id, None);
    }

    #[test]
    fn reads_prefix_and_guild() {
        let config = load(&[
            ("DISCORD_TOKEN", "secret"),
            ("DICE_PREFIX", "?"),
            ("GUILD_ID", "81384788765712384"),
        ])
        .unwrap();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.guild_id, Some(GuildId::new(81_384_788_765_712_384)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("DISCORD_TOKEN", "secret"), ("GUILD_ID", "general")]),
            Err(ConfigError::Invalid {
                name: "GUILD_ID",
                ..
            })
        ));
        assert!(matches!(
            load(&[("DISCORD_TOKEN", "secret"), ("GUILD_ID", "0")]),
            Err(ConfigError::Invalid {
                name: "GUILD_ID",
                ..
            })
        ));
        assert!(matches!(
            load(&[("DISCORD_TOKEN", "secret"), ("DICE_PREFIX", "")]),
            Err(ConfigError::Invalid {
                name: "DICE_PREFIX",
                ..
            })
        ));
    }
}

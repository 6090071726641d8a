use super::errors::{DiceError, Error};
use super::Context;
use crate::colour::{compute_colour, Rgb};
use crate::reply::{display_name, RollReply};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Die rolled when none is given
pub(crate) const DEFAULT_DIE: i64 = 20;
/// Most dice a single request may roll
pub(crate) const MAX_DICE: u32 = 1000;

/// What to roll: `count` dice with `die_size` faces each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RollRequest {
    pub(crate) die_size: i64,
    pub(crate) count: u32,
}

impl RollRequest {
    /// Fill in defaults and clamp the count to `1..=MAX_DICE`.
    /// The die size is checked when rolling.
    pub(crate) fn new(die_size: Option<i64>, count: Option<i64>) -> Self {
        RollRequest {
            die_size: die_size.unwrap_or(DEFAULT_DIE),
            count: clamp_count(count.unwrap_or(1)),
        }
    }

    pub(crate) fn roll(&self) -> Result<RollResult, DiceError> {
        roll_dice(self.die_size, self.count)
    }
}

// the clamp keeps the cast in range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_count(count: i64) -> u32 {
    count.clamp(1, i64::from(MAX_DICE)) as u32
}

/// The outcome of a request, in the order the dice were drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RollResult {
    pub(crate) die_size: u32,
    pub(crate) rolls: Vec<u32>,
    pub(crate) total: u64,
    pub(crate) colour: Rgb,
}

impl RollResult {
    pub(crate) fn count(&self) -> usize {
        self.rolls.len()
    }

    /// A natural roll shows the die's highest face
    pub(crate) fn is_natural(&self, roll: u32) -> bool {
        roll == self.die_size
    }
}

/// Comma separated rolls with naturals in bold, e.g. `3, **6**, 1`
impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &roll) in self.rolls.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if self.is_natural(roll) {
                write!(f, "**{roll}**")?;
            } else {
                write!(f, "{roll}")?;
            }
        }
        Ok(())
    }
}

/// Roll `count` dice using a fresh generator seeded from the OS
pub(crate) fn roll_dice(die_size: i64, count: u32) -> Result<RollResult, DiceError> {
    // a new generator per request keeps requests independent of each other
    let mut rng = StdRng::from_entropy();
    roll_dice_with(&mut rng, die_size, count)
}

/// Roll `count` dice with faces `1..=die_size` drawn from `rng`
pub(crate) fn roll_dice_with<R: Rng + ?Sized>(
    rng: &mut R,
    die_size: i64,
    count: u32,
) -> Result<RollResult, DiceError> {
    let die = u32::try_from(die_size)
        .ok()
        .filter(|&sides| sides >= 1)
        .ok_or(DiceError::InvalidDieSize(die_size))?;

    let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=die)).collect();
    let total = rolls.iter().copied().map(u64::from).sum();

    Ok(RollResult {
        die_size: die,
        colour: compute_colour(die, count, total),
        rolls,
        total,
    })
}

/// The dice offered by the slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub(crate) enum DieChoice {
    #[name = "d4"]
    D4,
    #[name = "d6"]
    D6,
    #[name = "d8"]
    D8,
    #[name = "d10"]
    D10,
    #[name = "d12"]
    D12,
    #[name = "d20"]
    D20,
    #[name = "d100"]
    D100,
}

impl DieChoice {
    fn sides(self) -> i64 {
        match self {
            DieChoice::D4 => 4,
            DieChoice::D6 => 6,
            DieChoice::D8 => 8,
            DieChoice::D10 => 10,
            DieChoice::D12 => 12,
            DieChoice::D20 => 20,
            DieChoice::D100 => 100,
        }
    }
}

/// Roll one or multiple dice
#[poise::command(slash_command)]
pub(crate) async fn roll(
    ctx: Context<'_>,
    #[description = "The type of die to roll (default: d20)"] die: Option<DieChoice>,
    #[description = "How many dice to roll (default: 1)"] amount: Option<i64>,
) -> Result<(), Error> {
    // let the server know we're working on it
    ctx.defer().await?;

    let request = RollRequest::new(die.map(DieChoice::sides), amount);
    let result = request.roll()?;

    let nick = ctx
        .author_member()
        .await
        .and_then(|member| member.nick.clone());
    let name = display_name(nick.as_deref(), &ctx.author().name);
    let avatar_url = ctx.author().avatar_url().unwrap_or_default();
    let reply = RollReply::new(&result, &name, avatar_url, ctx.channel_id());

    tracing::info!(
        channel = %reply.channel_id,
        total = result.total,
        "{}",
        reply.author_line
    );
    ctx.send(poise::CreateReply::default().embed(reply.create_embed())).await?;
    Ok(())
}

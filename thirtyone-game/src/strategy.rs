//! Keep/discard decision rules.
//!
//! Every built-in rule funnels through [`keep_designated_or_lowest`]; variants
//! differ only in which faces they are willing to collect at each point of a
//! turn. Strategies are immutable after construction and shared across
//! threads by the experiment runner.

use smallvec::SmallVec;

use crate::constants::{DICE_PER_TURN, PREMEDITATED_PLAYER_THRESHOLD, WILD_FACE, WILD_REWARD};

/// Values a strategy keeps from one throw: kept faces, with `0` standing in
/// for each kept wild three.
pub type KeeperSet = SmallVec<[u8; DICE_PER_TURN]>;

/// What a strategy can see when deciding which dice to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    /// Dice in play for this throw; equals the number of rolls.
    pub remaining: usize,
    /// Score accumulated earlier in the turn.
    pub score: u32,
    /// Highest score that still beats the current leader.
    pub target: u32,
    /// Players who act after this one in the current game.
    pub future_players: usize,
}

impl TurnContext {
    #[must_use]
    pub const fn new(remaining: usize, score: u32, target: u32, future_players: usize) -> Self {
        Self {
            remaining,
            score,
            target,
            future_players,
        }
    }

    #[must_use]
    pub const fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }
}

/// Decision rule for one player.
///
/// Implementations must return at least one keeper for any non-empty roll set
/// and must answer identically for identical inputs.
pub trait Strategy: Send + Sync {
    /// Stable identity used to tally wins.
    fn name(&self) -> &str;

    /// Choose which of `rolls` to keep.
    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        (**self).pick_keepers(rolls, ctx)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        (**self).pick_keepers(rolls, ctx)
    }
}

/// Keep every three (as a zero), every designated face that keeps
/// `score + face` within `target`, and otherwise the single lowest die.
///
/// Designated faces are checked against the score at the start of the
/// decision; faces kept earlier in the same throw are not added first.
#[must_use]
pub fn keep_designated_or_lowest(
    rolls: &[u8],
    designated: &[u8],
    score: u32,
    target: u32,
) -> KeeperSet {
    let mut keepers = KeeperSet::new();
    let mut lowest: Option<u8> = None;

    for &roll in rolls {
        if roll == WILD_FACE {
            keepers.push(WILD_REWARD);
        } else if designated.contains(&roll) && score.saturating_add(u32::from(roll)) <= target {
            keepers.push(roll);
        } else {
            lowest = Some(lowest.map_or(roll, |low| low.min(roll)));
        }
    }

    if keepers.is_empty()
        && let Some(low) = lowest
    {
        keepers.push(low);
    }
    keepers
}

const NONE: &[u8] = &[];
const ONES: &[u8] = &[1];
const ONES_AND_TWOS: &[u8] = &[1, 2];

/// Keeps threes, otherwise the lowest die.
#[derive(Debug, Clone, Copy, Default)]
pub struct Only3OrLowest;

/// Keeps threes and ones, otherwise the lowest die.
#[derive(Debug, Clone, Copy, Default)]
pub struct Only31OrLowest;

/// Keeps threes, ones and twos, otherwise the lowest die.
#[derive(Debug, Clone, Copy, Default)]
pub struct Only312OrLowest;

/// Defers collecting low faces: ones from four dice left, twos from three.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeHigherDiceLater1;

/// Ones from four dice left, twos only with two left.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeHigherDiceLater2;

/// Ones from three dice left, twos with two left.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeHigherDiceLater3;

/// Ones from three dice left, never twos.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeHigherDiceLater4;

impl Strategy for Only3OrLowest {
    fn name(&self) -> &str {
        "Only3OrLowest"
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        keep_designated_or_lowest(rolls, NONE, ctx.score, ctx.target)
    }
}

impl Strategy for Only31OrLowest {
    fn name(&self) -> &str {
        "Only31OrLowest"
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        keep_designated_or_lowest(rolls, ONES, ctx.score, ctx.target)
    }
}

impl Strategy for Only312OrLowest {
    fn name(&self) -> &str {
        "Only312OrLowest"
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        keep_designated_or_lowest(rolls, ONES_AND_TWOS, ctx.score, ctx.target)
    }
}

impl TakeHigherDiceLater1 {
    const fn designated(remaining: usize) -> &'static [u8] {
        match remaining {
            4 => ONES,
            2 | 3 => ONES_AND_TWOS,
            _ => NONE,
        }
    }
}

impl TakeHigherDiceLater2 {
    const fn designated(remaining: usize) -> &'static [u8] {
        match remaining {
            3 | 4 => ONES,
            2 => ONES_AND_TWOS,
            _ => NONE,
        }
    }
}

impl TakeHigherDiceLater3 {
    const fn designated(remaining: usize) -> &'static [u8] {
        match remaining {
            3 => ONES,
            2 => ONES_AND_TWOS,
            _ => NONE,
        }
    }
}

impl TakeHigherDiceLater4 {
    const fn designated(remaining: usize) -> &'static [u8] {
        match remaining {
            2 | 3 => ONES,
            _ => NONE,
        }
    }
}

macro_rules! take_higher_dice_later_strategy {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Strategy for $ty {
                fn name(&self) -> &str {
                    stringify!($ty)
                }

                fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
                    keep_designated_or_lowest(
                        rolls,
                        Self::designated(ctx.remaining),
                        ctx.score,
                        ctx.target,
                    )
                }
            }
        )*
    };
}

take_higher_dice_later_strategy!(
    TakeHigherDiceLater1,
    TakeHigherDiceLater2,
    TakeHigherDiceLater3,
    TakeHigherDiceLater4,
);

/// [`TakeHigherDiceLater3`] aiming below a fixed target while a crowd of
/// players is still to act. If the live target is already lower it wins.
#[derive(Debug, Clone)]
pub struct PremeditatedTarget {
    premeditated: u32,
    name: String,
    inner: TakeHigherDiceLater3,
}

impl PremeditatedTarget {
    #[must_use]
    pub fn new(premeditated: u32) -> Self {
        Self {
            premeditated,
            name: format!("PremeditatedTarget{premeditated}"),
            inner: TakeHigherDiceLater3,
        }
    }

    #[must_use]
    pub const fn premeditated(&self) -> u32 {
        self.premeditated
    }

    /// Target actually used for a decision in `ctx`.
    #[must_use]
    pub const fn effective_target(&self, ctx: &TurnContext) -> u32 {
        if ctx.future_players > PREMEDITATED_PLAYER_THRESHOLD && self.premeditated < ctx.target {
            self.premeditated
        } else {
            ctx.target
        }
    }
}

impl Strategy for PremeditatedTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick_keepers(&self, rolls: &[u8], ctx: &TurnContext) -> KeeperSet {
        let adjusted = ctx.with_target(self.effective_target(ctx));
        self.inner.pick_keepers(rolls, &adjusted)
    }
}

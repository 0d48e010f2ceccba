//! Centralized rule constants for the Thirty-One dice game.
//!
//! These values define the deterministic math of a turn and a game.

// Dice -------------------------------------------------------------------
/// Dice thrown at the start of every turn.
pub const DICE_PER_TURN: usize = 5;
pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;
/// Face that always counts as zero when kept.
pub const WILD_FACE: u8 = 3;
/// Value recorded in a keeper set in place of a kept wild face.
pub const WILD_REWARD: u8 = 0;

// Scoring ----------------------------------------------------------------
/// One above the highest qualifying score; the opening winning score of a game.
pub const QUALIFYING_SENTINEL: u32 = 31;
/// Highest score any turn can reach (five sixes).
pub const MAX_TURN_SCORE: u32 = 30;

// Strategy tuning --------------------------------------------------------
/// Premeditated targets engage only when more players than this remain.
pub const PREMEDITATED_PLAYER_THRESHOLD: usize = 5;

// Experiment defaults ----------------------------------------------------
pub const DEFAULT_GAMES: usize = 10_000;
pub const DEFAULT_PLAYERS: usize = 1;
pub const DEFAULT_SEED: u64 = 1337;

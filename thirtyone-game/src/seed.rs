//! Deterministic seed derivation for independent random streams.
//!
//! A single user seed fans out into one stream per trial and purpose, so a
//! trial replays identically whether it runs alone, sequentially or on a
//! worker thread.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Purpose of a derived stream inside one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Dice,
    SeatOrder,
}

impl Stream {
    const fn tag(self) -> &'static [u8] {
        match self {
            Self::Dice => b"dice",
            Self::SeatOrder => b"seat-order",
        }
    }
}

/// Derive a stream seed from a user seed and a domain tag.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so this never fails.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Seed for `stream` in trial number `trial`.
#[must_use]
pub fn trial_seed(user_seed: u64, trial: u64, stream: Stream) -> u64 {
    let mut tag = Vec::with_capacity(8 + 1 + stream.tag().len());
    tag.extend_from_slice(&trial.to_le_bytes());
    tag.push(b':');
    tag.extend_from_slice(stream.tag());
    derive_stream_seed(user_seed, &tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_stable() {
        assert_eq!(
            derive_stream_seed(1337, b"dice"),
            derive_stream_seed(1337, b"dice")
        );
        assert_eq!(
            trial_seed(42, 9, Stream::Dice),
            trial_seed(42, 9, Stream::Dice)
        );
    }

    #[test]
    fn streams_and_trials_are_separated() {
        let dice = trial_seed(42, 0, Stream::Dice);
        let order = trial_seed(42, 0, Stream::SeatOrder);
        let next = trial_seed(42, 1, Stream::Dice);
        let other_user = trial_seed(43, 0, Stream::Dice);
        assert_ne!(dice, order);
        assert_ne!(dice, next);
        assert_ne!(dice, other_user);
    }
}

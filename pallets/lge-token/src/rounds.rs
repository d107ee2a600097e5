//! Whitelist rounds and their timing.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;
use sp_std::vec::Vec;

/// Index of a round inside the configured sequence.
pub type RoundIndex = u32;

/// One configured whitelist phase.
///
/// `start_time` stays `None` until the first gated buy against the round and
/// is never rewritten after that, whatever `reconfigure` is called with.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, RuntimeDebug)]
pub struct Round {
    /// Window length in seconds once started.
    pub duration: u64,
    /// Cumulative cap per whitelisted account.
    pub max_amount: u128,
    /// Unix seconds of the first gated buy.
    pub start_time: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum RoundPhase {
    /// Clock not started yet.
    Pending,
    Active { ends_at: u64 },
    Expired,
}

/// Per-account state inside one round.
#[derive(
    Clone, Copy, Default, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, RuntimeDebug,
)]
pub struct Membership {
    pub whitelisted: bool,
    pub bought: u128,
}

/// Snapshot of the round under the current pointer.
#[derive(Clone, Encode, Decode, TypeInfo, PartialEq, Eq, RuntimeDebug)]
pub struct RoundReport {
    pub index: RoundIndex,
    pub duration: u64,
    pub start_time: Option<u64>,
    pub ends_at: Option<u64>,
    pub max_amount: u128,
    /// Started and not yet expired.
    pub active: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum ConfigError {
    /// `durations` and `max_amounts` differ in length.
    LengthMismatch,
}

impl Round {
    pub fn new(duration: u64, max_amount: u128) -> Self {
        Self { duration, max_amount, start_time: None }
    }

    pub fn ends_at(&self) -> Option<u64> {
        self.start_time.map(|start| start.saturating_add(self.duration))
    }

    pub fn phase(&self, now: u64) -> RoundPhase {
        match self.ends_at() {
            None => RoundPhase::Pending,
            Some(ends_at) if now < ends_at => RoundPhase::Active { ends_at },
            Some(_) => RoundPhase::Expired,
        }
    }

    pub fn is_active(&self, now: u64) -> bool {
        matches!(self.phase(now), RoundPhase::Active { .. })
    }

    /// Replaces duration and cap. An already running clock keeps its start,
    /// only the expiry moves.
    pub fn reconfigure(&mut self, duration: u64, max_amount: u128) {
        self.duration = duration;
        self.max_amount = max_amount;
    }

    pub fn report(&self, index: RoundIndex, now: u64) -> RoundReport {
        RoundReport {
            index,
            duration: self.duration,
            start_time: self.start_time,
            ends_at: self.ends_at(),
            max_amount: self.max_amount,
            active: self.is_active(now),
        }
    }
}

/// Builds a fresh, unstarted round sequence from parallel lists.
///
/// Two empty lists are accepted and yield no rounds, which disables gating.
pub fn configure(durations: &[u64], max_amounts: &[u128]) -> Result<Vec<Round>, ConfigError> {
    if durations.len() != max_amounts.len() {
        return Err(ConfigError::LengthMismatch);
    }
    Ok(durations.iter().zip(max_amounts).map(|(d, m)| Round::new(*d, *m)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_pairs_lists_in_order() {
        let rounds = configure(&[1200, 600], &[1_000, 5_000]).unwrap();
        assert_eq!(rounds, vec![Round::new(1200, 1_000), Round::new(600, 5_000)]);
        assert!(rounds.iter().all(|r| r.start_time.is_none()));
    }

    #[test]
    fn configure_rejects_mismatched_lengths() {
        assert_eq!(configure(&[1200], &[1_000, 5_000]), Err(ConfigError::LengthMismatch));
        assert_eq!(configure(&[1200, 600], &[]), Err(ConfigError::LengthMismatch));
    }

    #[test]
    fn configure_accepts_empty_sequence() {
        assert_eq!(configure(&[], &[]), Ok(vec![]));
    }

    #[test]
    fn phase_follows_start_and_duration() {
        let mut round = Round::new(100, 1);
        assert_eq!(round.phase(5_000), RoundPhase::Pending);
        assert!(!round.is_active(5_000));

        round.start_time = Some(1_000);
        assert_eq!(round.phase(1_000), RoundPhase::Active { ends_at: 1_100 });
        assert_eq!(round.phase(1_099), RoundPhase::Active { ends_at: 1_100 });
        // the end instant is already expired
        assert_eq!(round.phase(1_100), RoundPhase::Expired);
    }

    #[test]
    fn reconfigure_keeps_start_time() {
        let mut round = Round::new(100, 1);
        round.start_time = Some(1_000);
        round.reconfigure(50, 7);
        assert_eq!(round.start_time, Some(1_000));
        assert_eq!(round.max_amount, 7);
        assert_eq!(round.phase(1_060), RoundPhase::Expired);
    }

    #[test]
    fn zero_duration_round_expires_on_start() {
        let mut round = Round::new(0, 1);
        round.start_time = Some(10);
        assert_eq!(round.phase(10), RoundPhase::Expired);
    }

    #[test]
    fn expiry_saturates_near_u64_max() {
        let mut round = Round::new(u64::MAX, 1);
        round.start_time = Some(10);
        assert_eq!(round.ends_at(), Some(u64::MAX));
        assert!(round.is_active(u64::MAX - 1));
    }

    #[test]
    fn report_carries_explicit_active_flag() {
        let mut round = Round::new(100, 9);
        let pending = round.report(0, 50);
        assert!(!pending.active);
        assert_eq!(pending.ends_at, None);

        round.start_time = Some(50);
        let live = round.report(0, 60);
        assert!(live.active);
        assert_eq!(live.ends_at, Some(150));

        let done = round.report(0, 150);
        assert!(!done.active);
        assert_eq!(done.index, 0);
        assert_eq!(done.max_amount, 9);
    }
}

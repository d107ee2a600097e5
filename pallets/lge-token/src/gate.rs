//! Purchase gate consulted before every ledger movement.
//!
//! [`evaluate`] only decides. It never writes, so a rejection cannot leave
//! anything behind; the caller persists a [`Verdict::Purchase`] or
//! [`Verdict::Started`] together with the balance change.

use sp_runtime::RuntimeDebug;

use crate::rounds::{Membership, Round, RoundIndex, RoundPhase};

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum Verdict {
    /// Not a buy from the pair, no rounds configured, or the round is over.
    Unrestricted,
    /// Buy from the pair that starts a round which is already over at that
    /// instant. The start is still recorded; the transfer itself is not gated.
    Started { round: RoundIndex, start_time: u64 },
    /// Gated buy inside an active round.
    Purchase {
        round: RoundIndex,
        /// Set when this transfer starts the round clock.
        started_at: Option<u64>,
        /// Recipient's cumulative amount once the transfer lands.
        bought: u128,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum Denial {
    NotWhitelisted,
    ExceedsWhitelistMax,
}

/// Decides whether `amount` may move from `from` at `now`.
///
/// `current` is the round under the current pointer, `None` when no rounds
/// exist. `membership` is only called for gated transfers inside a running
/// round.
pub fn evaluate<AccountId: PartialEq>(
    pair: Option<&AccountId>,
    current: Option<(RoundIndex, &Round)>,
    from: &AccountId,
    amount: u128,
    now: u64,
    membership: impl FnOnce(RoundIndex) -> Membership,
) -> Result<Verdict, Denial> {
    if pair != Some(from) {
        return Ok(Verdict::Unrestricted);
    }
    let Some((index, round)) = current else {
        return Ok(Verdict::Unrestricted);
    };

    let (start_time, started_at) = match round.start_time {
        Some(start) => (start, None),
        None => (now, Some(now)),
    };
    let window = Round { start_time: Some(start_time), ..round.clone() };
    if !matches!(window.phase(now), RoundPhase::Active { .. }) {
        return Ok(match started_at {
            Some(start_time) => Verdict::Started { round: index, start_time },
            None => Verdict::Unrestricted,
        });
    }

    let member = membership(index);
    if !member.whitelisted {
        return Err(Denial::NotWhitelisted);
    }
    let bought = member
        .bought
        .checked_add(amount)
        .filter(|total| *total <= round.max_amount)
        .ok_or(Denial::ExceedsWhitelistMax)?;

    Ok(Verdict::Purchase { round: index, started_at, bought })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: u64 = 10;
    const BUYER: u64 = 2;

    fn member(bought: u128) -> Membership {
        Membership { whitelisted: true, bought }
    }

    fn started(duration: u64, max_amount: u128, start: u64) -> Round {
        Round { duration, max_amount, start_time: Some(start) }
    }

    #[test]
    fn transfers_not_from_pair_are_unrestricted() {
        let round = Round::new(100, 1);
        let verdict = evaluate(Some(&PAIR), Some((0, &round)), &BUYER, 1_000, 0, |_| {
            panic!("membership must not be read for ungated transfers")
        });
        assert_eq!(verdict, Ok(Verdict::Unrestricted));
    }

    #[test]
    fn missing_pair_or_rounds_disable_gating() {
        let round = Round::new(100, 1);
        assert_eq!(
            evaluate(None, Some((0, &round)), &PAIR, 5, 0, |_| Membership::default()),
            Ok(Verdict::Unrestricted)
        );
        assert_eq!(
            evaluate(Some(&PAIR), None, &PAIR, 5, 0, |_| Membership::default()),
            Ok(Verdict::Unrestricted)
        );
    }

    #[test]
    fn first_buy_starts_the_clock() {
        let round = Round::new(1200, 1_000);
        let verdict = evaluate(Some(&PAIR), Some((0, &round)), &PAIR, 500, 77, |_| member(0));
        assert_eq!(
            verdict,
            Ok(Verdict::Purchase { round: 0, started_at: Some(77), bought: 500 })
        );
        // decision only, the round itself is untouched
        assert_eq!(round.start_time, None);
    }

    #[test]
    fn running_round_does_not_restart() {
        let round = started(1200, 1_000, 50);
        let verdict = evaluate(Some(&PAIR), Some((1, &round)), &PAIR, 100, 60, |_| member(300));
        assert_eq!(verdict, Ok(Verdict::Purchase { round: 1, started_at: None, bought: 400 }));
    }

    #[test]
    fn non_member_is_denied_for_any_amount() {
        let round = started(1200, 1_000, 0);
        for amount in [0, 1, 1_000] {
            assert_eq!(
                evaluate(Some(&PAIR), Some((0, &round)), &PAIR, amount, 10, |_| {
                    Membership::default()
                }),
                Err(Denial::NotWhitelisted)
            );
        }
    }

    #[test]
    fn cap_is_inclusive_and_not_clipped() {
        let round = started(1200, 1_000, 0);
        assert_eq!(
            evaluate(Some(&PAIR), Some((0, &round)), &PAIR, 500, 10, |_| member(500)),
            Ok(Verdict::Purchase { round: 0, started_at: None, bought: 1_000 })
        );
        assert_eq!(
            evaluate(Some(&PAIR), Some((0, &round)), &PAIR, 501, 10, |_| member(500)),
            Err(Denial::ExceedsWhitelistMax)
        );
    }

    #[test]
    fn overflowing_total_is_denied() {
        let round = started(1200, u128::MAX, 0);
        assert_eq!(
            evaluate(Some(&PAIR), Some((0, &round)), &PAIR, 2, 10, |_| member(u128::MAX - 1)),
            Err(Denial::ExceedsWhitelistMax)
        );
    }

    #[test]
    fn expired_round_releases_gating() {
        let round = started(1200, 1_000, 0);
        let verdict = evaluate(Some(&PAIR), Some((0, &round)), &PAIR, 10_000, 1200, |_| {
            panic!("membership must not be read after expiry")
        });
        assert_eq!(verdict, Ok(Verdict::Unrestricted));
    }

    #[test]
    fn zero_duration_round_records_start_without_gating() {
        let round = Round::new(0, 1_000);
        let verdict = evaluate(Some(&PAIR), Some((2, &round)), &PAIR, 5_000, 10, |_| {
            panic!("membership must not be read outside the window")
        });
        assert_eq!(verdict, Ok(Verdict::Started { round: 2, start_time: 10 }));

        // once recorded, the same round is simply over
        let round = started(0, 1_000, 10);
        assert_eq!(
            evaluate(Some(&PAIR), Some((2, &round)), &PAIR, 5_000, 11, |_| Membership::default()),
            Ok(Verdict::Unrestricted)
        );
    }
}

use super::*;
use crate::scorecard::HoleScore;
use crate::scorecard::Par;
use crate::settle::Balances;
use crate::Distance;
use crate::Hole;
use crate::PlayerId;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Closest-to-the-pin winner record for one par 3.
///
/// `winner` is `None` when nobody held the green or when the closest
/// distance was shared. A tied greenie pays nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenieResult {
    hole: Hole,
    winner: Option<PlayerId>,
}

impl GreenieResult {
    /// Constructed only for eligible holes, so par is fixed at 3.
    pub fn new(hole: Hole, winner: Option<PlayerId>) -> Self {
        Self { hole, winner }
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn par(&self) -> Par {
        Par::Three
    }
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }
}

/// The greenie side game: closest tee shot to hold a par-3 green.
pub struct Greenie;

impl Greenie {
    /// Only par 3s can produce a greenie.
    pub fn eligible(par: Par) -> bool {
        par == Par::Three
    }

    /// Decides the winner of one hole from proximity claims.
    ///
    /// No proximity data, an empty green, or a shared minimum distance all
    /// resolve to `None`. Ties are never broken by entry order; a tied
    /// greenie is a push.
    pub fn winner(par: Par, proximities: &BTreeMap<PlayerId, Distance>) -> Option<PlayerId> {
        if !Self::eligible(par) {
            return None;
        }
        let best = proximities
            .values()
            .copied()
            .filter(|d| d.is_finite())
            .fold(Distance::INFINITY, Distance::min);
        if !best.is_finite() {
            return None;
        }
        let mut closest = proximities.iter().filter(|(_, d)| **d == best);
        match (closest.next(), closest.next()) {
            (Some((player, _)), None) => Some(player.clone()),
            _ => None,
        }
    }

    /// Evaluates one finalized hole; `None` for holes that are not par 3s.
    pub fn evaluate(hole: &HoleScore) -> Option<GreenieResult> {
        Self::eligible(hole.par()).then(|| {
            GreenieResult::new(
                hole.hole(),
                Self::winner(hole.par(), &hole.claims().proximities),
            )
        })
    }

    /// 1-indexed hole numbers of the par 3s, in card order.
    pub fn par_threes(pars: &[Par]) -> Vec<Hole> {
        pars.iter()
            .enumerate()
            .filter(|(_, p)| Self::eligible(**p))
            .map(|(i, _)| i as Hole + 1)
            .collect()
    }

    /// Greenies won by one player across a result set.
    pub fn count(results: &[GreenieResult], player: &str) -> usize {
        results
            .iter()
            .filter(|r| r.winner().map(String::as_str) == Some(player))
            .count()
    }

    /// Nets each greenie as `amount` collected from every other roster
    /// member, aggregated into one signed balance per player.
    ///
    /// A single-player roster has nobody to collect from and settles flat.
    pub fn settle(
        results: &[GreenieResult],
        config: &SideBetConfig,
        roster: &[PlayerId],
    ) -> anyhow::Result<Balances> {
        config.validate()?;
        if roster.is_empty() {
            return Err(anyhow::anyhow!("empty roster"));
        }
        let mut balances = Balances::zeroed(roster);
        if !config.enabled || roster.len() < 2 {
            return Ok(balances);
        }
        for winner in results.iter().filter_map(|r| r.winner()) {
            for player in roster.iter().filter(|p| *p != winner) {
                balances.debit(player, config.amount);
                balances.credit(winner, config.amount);
            }
        }
        balances.validated()
    }
}

use super::*;
use crate::scorecard::HoleScore;
use crate::scorecard::Par;
use crate::settle::Balances;
use crate::Hole;
use crate::PlayerId;
use crate::Strokes;
use serde::Deserialize;
use serde::Serialize;

/// One sandy attempt: a claimed bunker escape and whether it held up.
///
/// Failed attempts are retained for history; settlement only pays the
/// successful ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandyResult {
    hole: Hole,
    player: PlayerId,
    success: bool,
    score_to_par: i16,
}

impl SandyResult {
    /// Direct constructor for manual overrides where the stroke delta was
    /// never tracked.
    pub fn new(hole: Hole, player: PlayerId, success: bool) -> Self {
        Self {
            hole,
            player,
            success,
            score_to_par: 0,
        }
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn player(&self) -> &PlayerId {
        &self.player
    }
    pub fn success(&self) -> bool {
        self.success
    }
    pub fn score_to_par(&self) -> i16 {
        self.score_to_par
    }
}

/// The sandy side game: up-and-down from a bunker at par or better.
pub struct Sandy;

impl Sandy {
    /// A sandy stands only when it was claimed AND the hole was played at
    /// par or better. Claiming one and then making bogey invalidates it.
    pub fn valid(claimed: bool, par: Par, score: Strokes) -> bool {
        claimed && score <= par.strokes()
    }

    /// Builds the full attempt record from a claim and the hole's score.
    /// `success` is derived here, never asserted by the claimant.
    pub fn record(hole: Hole, player: PlayerId, claimed: bool, par: Par, score: Strokes) -> SandyResult {
        SandyResult {
            hole,
            player,
            success: Self::valid(claimed, par, score),
            score_to_par: score as i16 - par.strokes() as i16,
        }
    }

    /// Derives attempt records for every claimant on one finalized hole.
    /// Claimants with no recorded score are skipped; there is nothing to
    /// validate the claim against.
    pub fn evaluate(hole: &HoleScore) -> Vec<SandyResult> {
        hole.claims()
            .sandy
            .iter()
            .filter_map(|(player, claimed)| {
                hole.strokes(player).map(|score| {
                    Self::record(hole.hole(), player.clone(), *claimed, hole.par(), score)
                })
            })
            .collect()
    }

    /// Successful sandies by one player across a result set.
    pub fn count(results: &[SandyResult], player: &str) -> usize {
        results
            .iter()
            .filter(|r| r.success() && r.player() == player)
            .count()
    }

    /// All attempts on one hole, successful or not.
    pub fn on_hole<'a>(results: &'a [SandyResult], hole: Hole) -> Vec<&'a SandyResult> {
        results.iter().filter(|r| r.hole() == hole).collect()
    }

    /// The attempts that held up.
    pub fn successes<'a>(results: &'a [SandyResult]) -> Vec<&'a SandyResult> {
        results.iter().filter(|r| r.success()).collect()
    }

    /// True if anyone converted a sandy on the given hole.
    pub fn hole_made(results: &[SandyResult], hole: Hole) -> bool {
        results.iter().any(|r| r.hole() == hole && r.success())
    }

    /// Nets each successful sandy as `amount` collected from every other
    /// roster member, aggregated per player. Same fan-out as greenies;
    /// a single-player roster settles flat.
    pub fn settle(
        results: &[SandyResult],
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
        for claimant in results.iter().filter(|r| r.success()).map(|r| r.player()) {
            for player in roster.iter().filter(|p| *p != claimant) {
                balances.debit(player, config.amount);
                balances.credit(claimant, config.amount);
            }
        }
        balances.validated()
    }
}

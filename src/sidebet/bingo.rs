use super::*;
use crate::settle::Balances;
use crate::Currency;
use crate::Hole;
use crate::PlayerId;
use crate::Points;
use crate::BBB_CATEGORIES;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// The three point categories of Bingo-Bango-Bongo, one award per hole
/// each: first ball on the green, closest once all balls are on, first
/// ball in the cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BbbCategory {
    FirstOn,
    Closest,
    FirstIn,
}

impl BbbCategory {
    pub const fn all() -> &'static [Self] {
        &[Self::FirstOn, Self::Closest, Self::FirstIn]
    }
}

impl std::fmt::Display for BbbCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstOn => write!(f, "bingo"),
            Self::Closest => write!(f, "bango"),
            Self::FirstIn => write!(f, "bongo"),
        }
    }
}

/// Category winners for one hole. `None` in a slot means the category was
/// tied or never decided, and nobody scores it, the same no-tie-wins
/// convention the other side games use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BbbHole {
    hole: Hole,
    first_on: Option<PlayerId>,
    closest: Option<PlayerId>,
    first_in: Option<PlayerId>,
}

impl BbbHole {
    pub fn new(hole: Hole) -> Self {
        Self {
            hole,
            ..Self::default()
        }
    }
    pub fn with(mut self, category: BbbCategory, player: PlayerId) -> Self {
        match category {
            BbbCategory::FirstOn => self.first_on = Some(player),
            BbbCategory::Closest => self.closest = Some(player),
            BbbCategory::FirstIn => self.first_in = Some(player),
        }
        self
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn winner(&self, category: BbbCategory) -> Option<&PlayerId> {
        match category {
            BbbCategory::FirstOn => self.first_on.as_ref(),
            BbbCategory::Closest => self.closest.as_ref(),
            BbbCategory::FirstIn => self.first_in.as_ref(),
        }
    }
}

/// Accumulated Bingo-Bango-Bongo points per player across a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BbbPoints(BTreeMap<PlayerId, Points>);

impl BbbPoints {
    /// One point to one player.
    pub fn award(&mut self, player: &str) {
        *self.0.entry(player.to_string()).or_insert(0) += 1;
    }

    /// Folds per-hole category winners into total points per player.
    pub fn calculate(holes: &[BbbHole]) -> Self {
        let mut points = Self::default();
        for hole in holes {
            for category in BbbCategory::all() {
                if let Some(player) = hole.winner(*category) {
                    points.award(player);
                }
            }
        }
        points
    }

    pub fn total(&self, player: &str) -> Points {
        self.0.get(player).copied().unwrap_or(0)
    }
    pub fn totals(&self) -> &BTreeMap<PlayerId, Points> {
        &self.0
    }
    /// Points handed out so far across all players.
    pub fn total_awarded(&self) -> Points {
        self.0.values().sum()
    }

    /// The outright points leader; a shared lead yields `None`.
    pub fn leader(&self) -> Option<(&PlayerId, Points)> {
        let best = self.0.values().copied().max()?;
        let mut at_best = self.0.iter().filter(|(_, p)| **p == best);
        match (at_best.next(), at_best.next()) {
            (Some((player, _)), None) => Some((player, best)),
            _ => None,
        }
    }

    /// Points still on the table with the given holes left.
    pub fn remaining(holes_left: usize) -> Points {
        BBB_CATEGORIES * holes_left as Points
    }

    /// Best total one player can still reach.
    pub fn max_possible(&self, player: &str, holes_left: usize) -> Points {
        self.total(player) + Self::remaining(holes_left)
    }

    /// Whether a trailing player could still catch the current best total
    /// by sweeping every remaining category.
    pub fn can_still_win(&self, player: &str, holes_left: usize) -> bool {
        let best = self.0.values().copied().max().unwrap_or(0);
        self.max_possible(player, holes_left) >= best
    }
}

/// The Bingo-Bango-Bongo side game.
pub struct Bingo;

impl Bingo {
    /// Settles accumulated points as a multi-way differential.
    ///
    /// Formula: every unordered pair (a, b) exchanges
    /// `(points_a - points_b) * amount`, which nets per player to
    /// `amount * (n * points_i - total_points)` over a roster of n.
    /// The pairwise differentials cancel in aggregate, so the result is
    /// exactly zero-sum; a single-player roster nets to zero on its own.
    pub fn settle(
        points: &BbbPoints,
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
        let n = roster.len() as i64;
        let total = roster.iter().map(|p| points.total(p) as i64).sum::<i64>();
        for player in roster {
            let differential = n * points.total(player) as i64 - total;
            balances.credit(player, config.amount * differential as Currency);
        }
        balances.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<PlayerId> {
        (0..n).map(|i| format!("p{}", i)).collect()
    }

    /// fold counts one point per decided category per hole
    #[test]
    fn calculate_folds_category_winners() {
        let holes = vec![
            BbbHole::new(1)
                .with(BbbCategory::FirstOn, "a".to_string())
                .with(BbbCategory::Closest, "b".to_string())
                .with(BbbCategory::FirstIn, "a".to_string()),
            BbbHole::new(2).with(BbbCategory::FirstIn, "b".to_string()),
        ];
        let points = BbbPoints::calculate(&holes);
        assert_eq!(points.total("a"), 2);
        assert_eq!(points.total("b"), 2);
        assert_eq!(points.total_awarded(), 4);
    }

    /// tied categories stay None and award nothing
    #[test]
    fn undecided_categories_award_nothing() {
        let holes = vec![BbbHole::new(1)];
        let points = BbbPoints::calculate(&holes);
        assert_eq!(points.total_awarded(), 0);
    }

    #[test]
    fn leader_requires_outright_lead() {
        let mut points = BbbPoints::default();
        points.award("a");
        points.award("a");
        points.award("b");
        assert_eq!(points.leader().map(|(p, n)| (p.as_str(), n)), Some(("a", 2)));
        points.award("b");
        assert_eq!(points.leader(), None);
    }

    #[test]
    fn comeback_arithmetic() {
        let mut points = BbbPoints::default();
        for _ in 0..9 {
            points.award("a");
        }
        points.award("b");
        // 3 points per hole still available
        assert_eq!(BbbPoints::remaining(4), 12);
        assert_eq!(points.max_possible("b", 4), 13);
        assert!(points.can_still_win("b", 4));
        assert!(!points.can_still_win("b", 2));
        assert!(points.can_still_win("a", 0));
    }

    /// worked example of the differential formula:
    /// points a=6 b=4 c=2, $1/point, n=3, total=12
    /// net_a = 3*6-12 = +6, net_b = 0, net_c = -6
    #[test]
    fn settle_differential_example() {
        let mut points = BbbPoints::default();
        let roster = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        for _ in 0..6 {
            points.award("a");
        }
        for _ in 0..4 {
            points.award("b");
        }
        for _ in 0..2 {
            points.award("c");
        }
        let config = SideBetConfig::enabled(BetKind::Bingo, 1.0);
        let balances = Bingo::settle(&points, &config, &roster).unwrap();
        assert_eq!(balances.net("a"), 6.0);
        assert_eq!(balances.net("b"), 0.0);
        assert_eq!(balances.net("c"), -6.0);
    }

    /// heads-up the differential is just (p_a - p_b) * amount each way
    #[test]
    fn settle_heads_up() {
        let mut points = BbbPoints::default();
        for _ in 0..5 {
            points.award("p0");
        }
        for _ in 0..3 {
            points.award("p1");
        }
        let config = SideBetConfig::enabled(BetKind::Bingo, 2.0);
        let balances = Bingo::settle(&points, &config, &roster(2)).unwrap();
        assert_eq!(balances.net("p0"), 8.0);
        assert_eq!(balances.net("p1"), -8.0);
    }

    #[test]
    fn single_player_settles_flat() {
        let mut points = BbbPoints::default();
        points.award("p0");
        let config = SideBetConfig::enabled(BetKind::Bingo, 2.0);
        let balances = Bingo::settle(&points, &config, &roster(1)).unwrap();
        assert_eq!(balances.net("p0"), 0.0);
    }

    /// points earned by players outside the roster never move money
    #[test]
    fn non_roster_points_are_ignored() {
        let mut points = BbbPoints::default();
        points.award("ghost");
        let config = SideBetConfig::enabled(BetKind::Bingo, 2.0);
        let balances = Bingo::settle(&points, &config, &roster(3)).unwrap();
        assert!(balances.iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn zero_sum_sweep() {
        for n in 1..=6usize {
            let roster = roster(n);
            let mut points = BbbPoints::default();
            for _ in 0..54 {
                let w = rand::random_range(0..roster.len());
                points.award(&roster[w]);
            }
            let config = SideBetConfig::enabled(BetKind::Bingo, 0.25);
            let balances = Bingo::settle(&points, &config, &roster).unwrap();
            assert!(balances.is_zero_sum());
        }
    }
}

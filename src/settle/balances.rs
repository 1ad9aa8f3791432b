use crate::Currency;
use crate::PlayerId;
use crate::EPSILON;
use colored::Colorize;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Net per-player balances for one bet, one match, or one season window.
///
/// Positive means the player is owed money; negative means the player owes.
/// Every settlement path in this crate produces one of these, and every one
/// of them must sum to zero across its roster: money only moves between
/// participants, it is never created or destroyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances(BTreeMap<PlayerId, Currency>);

impl Balances {
    /// A balance map with every roster member present at exactly zero.
    /// Settlement starts from here so that players who never won or lost
    /// anything still appear in the output.
    pub fn zeroed(roster: &[PlayerId]) -> Self {
        roster.iter().map(|p| (p.clone(), 0.0)).collect()
    }

    pub fn credit(&mut self, player: &str, amount: Currency) {
        *self.0.entry(player.to_string()).or_insert(0.0) += amount;
    }
    pub fn debit(&mut self, player: &str, amount: Currency) {
        *self.0.entry(player.to_string()).or_insert(0.0) -= amount;
    }

    /// Signed net for one player; players the map has never seen are flat.
    pub fn net(&self, player: &str) -> Currency {
        self.0.get(player).copied().unwrap_or(0.0)
    }

    /// Sum of all signed balances. Zero (within epsilon) on any valid
    /// settlement.
    pub fn total(&self) -> Currency {
        self.0.values().sum()
    }

    pub fn is_zero_sum(&self) -> bool {
        self.total().abs() <= EPSILON
    }

    /// Asserts the zero-sum invariant.
    ///
    /// A violation is a logic bug in an evaluator, never a user input
    /// problem, so it is loud: error-level log plus an `Err` the caller
    /// must not swallow.
    pub fn validated(self) -> anyhow::Result<Self> {
        if self.is_zero_sum() {
            Ok(self)
        } else {
            log::error!("settlement drift: balances sum to {}", self.total());
            Err(anyhow::anyhow!(
                "non-zero-sum settlement: {:+}",
                self.total()
            ))
        }
    }

    /// Folds another balance map into this one, key by key.
    pub fn absorb(&mut self, other: Self) {
        for (player, amount) in other.0 {
            *self.0.entry(player).or_insert(0.0) += amount;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Currency)> {
        self.0.iter()
    }
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.0.keys()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PlayerId, Currency)> for Balances {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Currency)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Balances {
    type Item = (PlayerId, Currency);
    type IntoIter = std::collections::btree_map::IntoIter<PlayerId, Currency>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Balances {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (player, amount) in self.0.iter() {
            let signed = format!("{:+.2}", amount);
            let signed = if *amount > EPSILON {
                signed.green()
            } else if *amount < -EPSILON {
                signed.red()
            } else {
                signed.normal()
            };
            writeln!(f, "{:<16} {}", player, signed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<PlayerId> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    /// zeroed includes every roster member, all flat
    #[test]
    fn zeroed_covers_roster() {
        let balances = Balances::zeroed(&roster());
        assert_eq!(balances.len(), 3);
        assert!(balances.is_zero_sum());
        assert_eq!(balances.net("b"), 0.0);
    }

    /// credit/debit keep the map in sync and unknown players read as flat
    #[test]
    fn credit_debit_roundtrip() {
        let mut balances = Balances::zeroed(&roster());
        balances.credit("a", 10.0);
        balances.debit("b", 10.0);
        assert_eq!(balances.net("a"), 10.0);
        assert_eq!(balances.net("b"), -10.0);
        assert_eq!(balances.net("nobody"), 0.0);
        assert!(balances.is_zero_sum());
    }

    /// absorb folds key by key
    #[test]
    fn absorb_merges_by_player() {
        let mut lhs = Balances::zeroed(&roster());
        lhs.credit("a", 5.0);
        lhs.debit("b", 5.0);
        let mut rhs = Balances::default();
        rhs.credit("b", 2.0);
        rhs.debit("c", 2.0);
        lhs.absorb(rhs);
        assert_eq!(lhs.net("a"), 5.0);
        assert_eq!(lhs.net("b"), -3.0);
        assert_eq!(lhs.net("c"), -2.0);
        assert!(lhs.is_zero_sum());
    }

    /// validation accepts balanced maps and rejects drifted ones
    #[test]
    fn validation_is_loud_on_drift() {
        let mut ok = Balances::default();
        ok.credit("a", 1.0);
        ok.debit("b", 1.0);
        assert!(ok.validated().is_ok());

        let mut bad = Balances::default();
        bad.credit("a", 1.0);
        assert!(bad.validated().is_err());
    }

    /// float accumulation within epsilon still counts as zero-sum
    #[test]
    fn epsilon_tolerance() {
        let mut balances = Balances::default();
        for _ in 0..10 {
            balances.credit("a", 0.1);
        }
        balances.debit("b", 1.0);
        assert!(balances.is_zero_sum());
    }
}

use super::*;
use crate::ledger::match_balances;
use crate::ledger::pairwise;
use crate::ledger::LedgerEntry;
use crate::settle::Balances;
use crate::Currency;
use crate::PlayerId;
use crate::EPSILON;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Rank movement relative to the previous standings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// One row of a season leaderboard.
///
/// Wins, losses, and pushes are head-to-head outcomes: one per opponent
/// the player actually traded ledger rows with, decided by the sign of
/// the pairwise net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub rank: usize,
    pub net: Currency,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub trend: Trend,
}

/// Ledger rows created inside the season's bounds.
pub fn in_season(entries: &[LedgerEntry], season: &Season) -> Vec<LedgerEntry> {
    entries
        .iter()
        .filter(|e| season.contains(e.created_at().date_naive()))
        .cloned()
        .collect()
}

/// Folds ledger rows into ranked standings for a member list.
///
/// Rows touching anyone outside `members` are ignored. Ranking is by net
/// amount descending; equal nets break by ascending player id so the
/// order is deterministic. Trend compares each player's rank against
/// `prior` (a player absent from `prior` is Neutral).
pub fn standings(
    entries: &[LedgerEntry],
    members: &[PlayerId],
    names: &BTreeMap<PlayerId, String>,
    prior: &[Standing],
) -> Vec<Standing> {
    let roster = members.iter().collect::<BTreeSet<&PlayerId>>();
    let relevant = entries
        .iter()
        .filter(|e| roster.contains(e.from()) && roster.contains(e.to()))
        .cloned()
        .collect::<Vec<LedgerEntry>>();

    let mut nets = Balances::zeroed(members);
    nets.absorb(match_balances(&relevant));

    let previous = prior
        .iter()
        .map(|s| (s.player.clone(), s.rank))
        .collect::<BTreeMap<PlayerId, usize>>();

    let mut order = members.to_vec();
    order.sort_by(|a, b| {
        nets.net(b)
            .partial_cmp(&nets.net(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(b))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(i, player)| {
            let rank = i + 1;
            let (mut wins, mut losses, mut pushes) = (0u32, 0u32, 0u32);
            for opponent in members.iter().filter(|o| **o != player) {
                let traded = relevant.iter().any(|e| {
                    e.from() == &player && e.to() == opponent
                        || e.from() == opponent && e.to() == &player
                });
                if !traded {
                    continue;
                }
                // positive net: the player owes this opponent the difference
                match pairwise(&player, opponent, &relevant) {
                    net if net > EPSILON => losses += 1,
                    net if net < -EPSILON => wins += 1,
                    _ => pushes += 1,
                }
            }
            let trend = match previous.get(&player) {
                Some(was) if *was > rank => Trend::Up,
                Some(was) if *was < rank => Trend::Down,
                _ => Trend::Neutral,
            };
            Standing {
                name: names.get(&player).cloned().unwrap_or_else(|| player.clone()),
                net: nets.net(&player),
                player,
                rank,
                wins,
                losses,
                pushes,
                trend,
            }
        })
        .collect()
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>2}. {:<16} {:+8.2} ({}-{}-{})",
            self.rank, self.name, self.net, self.wins, self.losses, self.pushes
        )
    }
}

use super::*;
use crate::scorecard::Scorecard;
use crate::sidebet::BbbPoints;
use crate::sidebet::Bingo;
use crate::sidebet::Greenie;
use crate::sidebet::GreenieResult;
use crate::sidebet::Sandy;
use crate::sidebet::SandyResult;
use crate::sidebet::SideBetConfigs;
use crate::PlayerId;
use serde::Deserialize;
use serde::Serialize;

/// The evaluator inputs for one match, ready to settle.
///
/// Greenie and sandy results derive mechanically from the scorecard's
/// claims; Bingo-Bango-Bongo winners are called on the course and arrive
/// as already-accumulated points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideBetSheet {
    pub greenies: Vec<GreenieResult>,
    pub sandies: Vec<SandyResult>,
    pub points: BbbPoints,
}

impl SideBetSheet {
    /// Derives greenie and sandy results from a finalized scorecard.
    pub fn from_scorecard(card: &Scorecard) -> Self {
        Self {
            greenies: card.holes().iter().filter_map(Greenie::evaluate).collect(),
            sandies: card.holes().iter().flat_map(Sandy::evaluate).collect(),
            points: BbbPoints::default(),
        }
    }
    pub fn with_points(mut self, points: BbbPoints) -> Self {
        self.points = points;
        self
    }
}

/// One match's settlement, broken down by bet kind for display plus the
/// merged total that actually goes to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub greenie: Balances,
    pub sandy: Balances,
    pub bingo: Balances,
    pub combined: Balances,
}

/// Runs every enabled side bet and merges the per-player nets into one
/// balance map.
///
/// Pure in (sheet, configs, roster): recomputing after a correction edit
/// replaces the previous answer wholesale, there is no incremental state
/// to reconcile. Disabled bets contribute an all-zero map.
pub fn settle_all(
    sheet: &SideBetSheet,
    configs: &SideBetConfigs,
    roster: &[PlayerId],
) -> anyhow::Result<Balances> {
    settle_detailed(sheet, configs, roster).map(|s| s.combined)
}

/// Same computation as [`settle_all`] but keeps the per-kind breakdown.
pub fn settle_detailed(
    sheet: &SideBetSheet,
    configs: &SideBetConfigs,
    roster: &[PlayerId],
) -> anyhow::Result<Settlement> {
    configs.validate()?;
    let greenie = Greenie::settle(&sheet.greenies, &configs.greenie, roster)?;
    let sandy = Sandy::settle(&sheet.sandies, &configs.sandy, roster)?;
    let bingo = Bingo::settle(&sheet.points, &configs.bingo, roster)?;
    let mut combined = Balances::zeroed(roster);
    combined.absorb(greenie.clone());
    combined.absorb(sandy.clone());
    combined.absorb(bingo.clone());
    let combined = combined.validated()?;
    log::debug!(
        "settled {} players across {} enabled side bets",
        roster.len(),
        configs.enabled().len()
    );
    Ok(Settlement {
        greenie,
        sandy,
        bingo,
        combined,
    })
}

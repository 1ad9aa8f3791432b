use crate::sidebet::BetKind;
use crate::Currency;
use crate::PlayerId;
use crate::ID;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Marker type for match identity.
/// The match aggregate itself lives in the application layer; this marker
/// lets ledger rows carry `ID<Match>` without a dependency on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match;

/// Marker type for the identity of one configured side bet within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bet;

/// One directional monetary obligation: `from` owes `to` exactly `amount`.
///
/// Rows are written once when a bet resolves and mutated only to flip
/// `settled`. Several rows may exist between the same pair across bet
/// kinds within one match; netting them happens at read time in
/// [`crate::ledger::balance`], never at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: ID<LedgerEntry>,
    match_id: ID<Match>,
    bet_id: ID<Bet>,
    bet: BetKind,
    from: PlayerId,
    to: PlayerId,
    amount: Currency,
    settled: bool,
    settled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Fallible constructor. Non-positive amounts and self-obligations are
    /// caller bugs and fail fast.
    pub fn try_new(
        match_id: ID<Match>,
        bet_id: ID<Bet>,
        bet: BetKind,
        from: PlayerId,
        to: PlayerId,
        amount: Currency,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        if !(amount > 0.0 && amount.is_finite()) {
            return Err(anyhow::anyhow!("transfer amount must be positive, got {}", amount));
        }
        if from == to {
            return Err(anyhow::anyhow!("{} cannot owe themselves", from));
        }
        Ok(Self {
            id: ID::default(),
            match_id,
            bet_id,
            bet,
            from,
            to,
            amount,
            settled: false,
            settled_at: None,
            created_at,
        })
    }

    pub fn id(&self) -> ID<LedgerEntry> {
        self.id
    }
    pub fn match_id(&self) -> ID<Match> {
        self.match_id
    }
    pub fn bet_id(&self) -> ID<Bet> {
        self.bet_id
    }
    pub fn bet(&self) -> BetKind {
        self.bet
    }
    pub fn from(&self) -> &PlayerId {
        &self.from
    }
    pub fn to(&self) -> &PlayerId {
        &self.to
    }
    pub fn amount(&self) -> Currency {
        self.amount
    }
    pub fn is_settled(&self) -> bool {
        self.settled
    }
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the obligation as paid. The only mutation a row ever sees.
    pub fn settle(mut self, at: DateTime<Utc>) -> Self {
        self.settled = true;
        self.settled_at = Some(at);
        self
    }
}

impl std::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} {:.2} ({}{})",
            self.from,
            self.to,
            self.amount,
            self.bet,
            if self.settled { ", settled" } else { "" }
        )
    }
}

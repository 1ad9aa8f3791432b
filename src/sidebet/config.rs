use crate::Currency;
use crate::DEFAULT_STAKE;
use serde::Deserialize;
use serde::Serialize;

/// The side-bet games a match can run alongside its main wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BetKind {
    Greenie,
    Sandy,
    Bingo,
}

impl BetKind {
    pub const fn all() -> &'static [Self] {
        &[Self::Greenie, Self::Sandy, Self::Bingo]
    }
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greenie => write!(f, "greenie"),
            Self::Sandy => write!(f, "sandy"),
            Self::Bingo => write!(f, "bingo-bango-bongo"),
        }
    }
}

/// One side bet's configuration for one match: the unit stake and whether
/// the game is on. Created at match setup, read-only during play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideBetConfig {
    pub kind: BetKind,
    pub amount: Currency,
    pub enabled: bool,
}

impl SideBetConfig {
    /// An enabled config with the given unit stake.
    pub fn enabled(kind: BetKind, amount: Currency) -> Self {
        Self {
            kind,
            amount,
            enabled: true,
        }
    }
    /// The stock disabled config used before a group opts in.
    pub fn disabled(kind: BetKind) -> Self {
        Self {
            kind,
            amount: DEFAULT_STAKE,
            enabled: false,
        }
    }
    /// Fails fast on stakes that cannot settle to anything sensible.
    /// Disabled configs are exempt; their amount is never read.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.enabled && !(self.amount > 0.0 && self.amount.is_finite()) {
            return Err(anyhow::anyhow!(
                "{} stake must be positive, got {}",
                self.kind,
                self.amount
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for SideBetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.enabled {
            write!(f, "{} @ {:.2}", self.kind, self.amount)
        } else {
            write!(f, "{} (off)", self.kind)
        }
    }
}

/// The full side-bet configuration for one match: exactly one config per
/// bet kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBetConfigs {
    pub greenie: SideBetConfig,
    pub sandy: SideBetConfig,
    pub bingo: SideBetConfig,
}

/// The stock config set for a match with no side bets: everything disabled
/// at a zero stake.
impl Default for SideBetConfigs {
    fn default() -> Self {
        Self {
            greenie: SideBetConfig::disabled(BetKind::Greenie),
            sandy: SideBetConfig::disabled(BetKind::Sandy),
            bingo: SideBetConfig::disabled(BetKind::Bingo),
        }
    }
}

impl SideBetConfigs {
    pub fn get(&self, kind: BetKind) -> &SideBetConfig {
        match kind {
            BetKind::Greenie => &self.greenie,
            BetKind::Sandy => &self.sandy,
            BetKind::Bingo => &self.bingo,
        }
    }
    /// Replaces the slot matching the config's kind.
    pub fn with(mut self, config: SideBetConfig) -> Self {
        match config.kind {
            BetKind::Greenie => self.greenie = config,
            BetKind::Sandy => self.sandy = config,
            BetKind::Bingo => self.bingo = config,
        }
        self
    }
    pub fn any_enabled(&self) -> bool {
        BetKind::all().iter().any(|k| self.get(*k).enabled)
    }
    pub fn enabled(&self) -> Vec<&SideBetConfig> {
        BetKind::all()
            .iter()
            .map(|k| self.get(*k))
            .filter(|c| c.enabled)
            .collect()
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        BetKind::all().iter().try_for_each(|k| self.get(*k).validate())
    }
}

impl crate::Arbitrary for SideBetConfigs {
    fn random() -> Self {
        let flip = |kind| {
            if rand::random_range(0..2) == 0 {
                SideBetConfig::enabled(kind, rand::random_range(1..=20) as Currency)
            } else {
                SideBetConfig::disabled(kind)
            }
        };
        Self {
            greenie: flip(BetKind::Greenie),
            sandy: flip(BetKind::Sandy),
            bingo: flip(BetKind::Bingo),
        }
    }
}

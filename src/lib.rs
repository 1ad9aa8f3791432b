//! Zero-sum settlement engine for informal golf wagers.
//!
//! This crate is the pure core of a group wager tracker: it turns raw
//! per-hole scores and side-bet claims into net monetary balances between
//! all participants of a match, and folds persisted ledger entries into
//! season standings. Every function here is synchronous, deterministic,
//! and side-effect-free; persistence, auth, and sync live elsewhere and
//! re-invoke these functions whenever their inputs change.

pub mod ledger;
pub mod scorecard;
pub mod season;
pub mod settle;
pub mod sidebet;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Opaque participant identifier. Referenced by id everywhere; never owned.
pub type PlayerId = String;
/// Monetary amounts in the group's (single) currency unit.
pub type Currency = f64;
/// 1-indexed hole number on a standard card.
pub type Hole = u8;
/// Stroke counts for one player on one hole.
pub type Strokes = u8;
/// Proximity-to-pin distances, in whatever unit the group agrees on.
pub type Distance = f64;
/// Accumulated side-game points (Bingo-Bango-Bongo).
pub type Points = u32;

// ============================================================================
// COURSE PARAMETERS
// ============================================================================
/// Holes on a full card.
pub const HOLES: Hole = 18;
/// Front nine hole numbers.
pub const FRONT_NINE: std::ops::RangeInclusive<Hole> = 1..=9;
/// Back nine hole numbers.
pub const BACK_NINE: std::ops::RangeInclusive<Hole> = 10..=18;
/// Point categories awarded per hole in Bingo-Bango-Bongo.
pub const BBB_CATEGORIES: Points = 3;

// ============================================================================
// SETTLEMENT PARAMETERS
// ============================================================================
/// Tolerance for the zero-sum invariant on floating-point balances.
pub const EPSILON: Currency = 1e-9;
/// Stock per-unit stake used by freshly created (disabled) bet configs.
pub const DEFAULT_STAKE: Currency = 0.0;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for tests and invariant sweeps.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
/// `ID<Match>` and `ID<Bet>` cannot be swapped for one another even though
/// both are UUIDs on the wire.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}
impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        <uuid::Uuid as serde::Serialize>::serialize(&self.inner, serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = <uuid::Uuid as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from(inner))
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
/// For the hosting application to call at startup; the settlement core itself
/// only emits through the `log` facade.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

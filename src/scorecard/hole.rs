use super::*;
use crate::Distance;
use crate::Hole;
use crate::PlayerId;
use crate::Strokes;
use crate::HOLES;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Side-bet claims attached to one hole's scoring data.
///
/// Claims are assertions made at the tee box or on the green; whether they
/// pay out is decided later by the evaluators. Absence of a claim is a valid
/// business outcome (no winner), never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Players who claim to have escaped a bunker on this hole.
    pub sandy: BTreeMap<PlayerId, bool>,
    /// Distance to the pin for players whose tee shot held the green.
    /// Players who missed the green are simply absent.
    pub proximities: BTreeMap<PlayerId, Distance>,
}

impl Claims {
    pub fn is_empty(&self) -> bool {
        self.sandy.is_empty() && self.proximities.is_empty()
    }
}

/// Finalized scoring data for one hole of one match.
///
/// Immutable once recorded; a correction edit replaces the whole record and
/// the caller re-runs settlement from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleScore {
    hole: Hole,
    par: Par,
    strokes: BTreeMap<PlayerId, Strokes>,
    claims: Claims,
}

impl HoleScore {
    /// Fallible constructor; hole numbers outside 1..=18 are rejected.
    pub fn try_new(
        hole: Hole,
        par: Par,
        strokes: BTreeMap<PlayerId, Strokes>,
    ) -> anyhow::Result<Self> {
        if hole < 1 || hole > HOLES {
            return Err(anyhow::anyhow!("hole {} out of range 1..={}", hole, HOLES));
        }
        Ok(Self {
            hole,
            par,
            strokes,
            claims: Claims::default(),
        })
    }

    /// Attaches side-bet claims to the record.
    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.claims = claims;
        self
    }

    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn par(&self) -> Par {
        self.par
    }
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
    /// Strokes taken by one player, if they scored this hole.
    pub fn strokes(&self, player: &str) -> Option<Strokes> {
        self.strokes.get(player).copied()
    }
    /// Players with a recorded score on this hole.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.strokes.keys()
    }
    /// Signed score relative to par for one player.
    pub fn to_par(&self, player: &str) -> Option<i16> {
        self.strokes(player)
            .map(|s| s as i16 - self.par.strokes() as i16)
    }
}

impl std::fmt::Display for HoleScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:<2} {}", self.hole, self.par)?;
        for (player, strokes) in self.strokes.iter() {
            write!(f, "  {} {}", player, strokes)?;
        }
        Ok(())
    }
}

use crate::Strokes;
use serde::Deserialize;
use serde::Serialize;

/// Par rating for a single hole.
///
/// Informal wager groups only ever play 3s, 4s, and 5s; par 3 is the only
/// rating eligible for a greenie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Par {
    Three,
    Four,
    Five,
}

impl Par {
    pub const fn all() -> &'static [Self] {
        &[Self::Three, Self::Four, Self::Five]
    }
    /// Strokes to play the hole at even par.
    pub const fn strokes(&self) -> Strokes {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }
}

impl TryFrom<u8> for Par {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            n => Err(anyhow::anyhow!("invalid par {}", n)),
        }
    }
}

impl std::fmt::Display for Par {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "par {}", self.strokes())
    }
}

impl crate::Arbitrary for Par {
    fn random() -> Self {
        match rand::random_range(0..3) {
            0 => Self::Three,
            1 => Self::Four,
            _ => Self::Five,
        }
    }
}

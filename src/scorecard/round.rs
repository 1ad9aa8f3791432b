use super::*;
use crate::Arbitrary;
use crate::Hole;
use crate::PlayerId;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

/// One match's raw scoring data: the roster plus an ordered list of
/// finalized holes.
///
/// This is the input boundary of the settlement core. The surrounding
/// application owns how it gets filled in (live scoring, offline sync,
/// correction edits); settlement only ever reads a complete snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    roster: Vec<PlayerId>,
    holes: Vec<HoleScore>,
}

impl Scorecard {
    /// Fallible constructor.
    ///
    /// Rejects empty rosters, duplicate roster entries, and duplicate hole
    /// numbers; these are caller bugs, not scoring outcomes.
    pub fn try_new(roster: Vec<PlayerId>, holes: Vec<HoleScore>) -> anyhow::Result<Self> {
        if roster.is_empty() {
            return Err(anyhow::anyhow!("empty roster"));
        }
        if roster.iter().collect::<BTreeSet<_>>().len() != roster.len() {
            return Err(anyhow::anyhow!("duplicate player in roster"));
        }
        let numbers = holes.iter().map(|h| h.hole()).collect::<BTreeSet<Hole>>();
        if numbers.len() != holes.len() {
            return Err(anyhow::anyhow!("duplicate hole number on card"));
        }
        Ok(Self { roster, holes })
    }

    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }
    pub fn holes(&self) -> &[HoleScore] {
        &self.holes
    }
    /// The hole record for a given 1-indexed hole number.
    pub fn hole(&self, number: Hole) -> Option<&HoleScore> {
        self.holes.iter().find(|h| h.hole() == number)
    }
    /// Par ratings in card order.
    pub fn pars(&self) -> Vec<Par> {
        self.holes.iter().map(|h| h.par()).collect()
    }
    /// Holes scored so far.
    pub fn played(&self) -> usize {
        self.holes.len()
    }
    /// Holes left to play on a full card.
    pub fn remaining(&self) -> usize {
        (crate::HOLES as usize).saturating_sub(self.played())
    }
}

impl crate::Arbitrary for Scorecard {
    fn random() -> Self {
        use std::collections::BTreeMap;
        let roster = (0..rand::random_range(1..=4usize))
            .map(|i| format!("p{}", i))
            .collect::<Vec<PlayerId>>();
        let holes = (1..=crate::HOLES)
            .map(|n| {
                let par = Par::random();
                let strokes = roster
                    .iter()
                    .map(|p| (p.clone(), rand::random_range(2..=8)))
                    .collect::<BTreeMap<PlayerId, crate::Strokes>>();
                let mut claims = Claims::default();
                for p in roster.iter() {
                    if rand::random_range(0..4) == 0 {
                        claims.sandy.insert(p.clone(), true);
                    }
                    if par == Par::Three && rand::random_range(0..2) == 0 {
                        claims
                            .proximities
                            .insert(p.clone(), rand::random_range(1..600) as f64 / 10.0);
                    }
                }
                HoleScore::try_new(n, par, strokes)
                    .expect("hole in range")
                    .with_claims(claims)
            })
            .collect();
        Self::try_new(roster, holes).expect("valid random card")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use std::collections::BTreeMap;

    fn hole(n: Hole) -> HoleScore {
        HoleScore::try_new(n, Par::Four, BTreeMap::new()).unwrap()
    }

    #[test]
    fn rejects_empty_roster() {
        assert!(Scorecard::try_new(vec![], vec![]).is_err());
    }

    #[test]
    fn rejects_duplicate_players() {
        let roster = vec!["a".to_string(), "a".to_string()];
        assert!(Scorecard::try_new(roster, vec![]).is_err());
    }

    #[test]
    fn rejects_duplicate_hole_numbers() {
        let roster = vec!["a".to_string()];
        assert!(Scorecard::try_new(roster, vec![hole(4), hole(4)]).is_err());
    }

    #[test]
    fn lookup_by_hole_number() {
        let roster = vec!["a".to_string()];
        let card = Scorecard::try_new(roster, vec![hole(2), hole(7)]).unwrap();
        assert_eq!(card.hole(7).map(|h| h.hole()), Some(7));
        assert_eq!(card.hole(8), None);
        assert_eq!(card.played(), 2);
        assert_eq!(card.remaining(), 16);
    }

    #[test]
    fn random_cards_are_valid() {
        for _ in 0..16 {
            let card = Scorecard::random();
            assert!(!card.roster().is_empty());
            assert_eq!(card.played(), crate::HOLES as usize);
        }
    }
}

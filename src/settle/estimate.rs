use crate::Currency;

/// Segments of a Nassau: front nine, back nine, overall eighteen.
pub const NASSAU_SEGMENTS: usize = 3;

/// Worst-case exposure of a Nassau for one player: losing all three
/// segments to everyone else at the unit stake.
///
/// Preview arithmetic for the match-setup screen; authoritative Nassau
/// settlement happens hole by hole, not here.
pub fn nassau_max(amount: Currency, roster: usize) -> Currency {
    amount * NASSAU_SEGMENTS as Currency * roster.saturating_sub(1) as Currency
}

/// Worst-case exposure of a skins game for one player: every hole's skin
/// going to somebody else at the unit stake. Carryovers redistribute skins
/// across holes but never change the total at risk.
///
/// Preview arithmetic only, same caveat as [`nassau_max`].
pub fn skins_max(amount: Currency, roster: usize, holes: usize) -> Currency {
    amount * holes as Currency * roster.saturating_sub(1) as Currency
}

use super::*;
use crate::settle::Balances;
use crate::Currency;
use crate::PlayerId;
use crate::EPSILON;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Signed net for one user across a set of rows: credits (rows paying the
/// user) count positive, debits (rows the user owes) count negative.
pub fn user_balance(user: &str, entries: &[LedgerEntry]) -> Currency {
    entries.iter().fold(0.0, |net, e| {
        if e.to() == user {
            net + e.amount()
        } else if e.from() == user {
            net - e.amount()
        } else {
            net
        }
    })
}

/// Net balances across every party appearing in any row. Every seen party
/// is initialized to zero before folding, so a user who only ever appears
/// on the paying side still shows up.
pub fn match_balances(entries: &[LedgerEntry]) -> Balances {
    let mut balances = entries
        .iter()
        .flat_map(|e| [e.from(), e.to()])
        .map(|p| (p.clone(), 0.0))
        .collect::<Balances>();
    for e in entries {
        balances.credit(e.to(), e.amount());
        balances.debit(e.from(), e.amount());
    }
    balances
}

/// Like [`match_balances`] but over open rows only.
pub fn unsettled_balances(entries: &[LedgerEntry]) -> Balances {
    let open = entries
        .iter()
        .filter(|e| !e.is_settled())
        .cloned()
        .collect::<Vec<LedgerEntry>>();
    match_balances(&open)
}

/// Players who owe money, sorted by how much they owe (largest first,
/// ties by id). Values keep their negative sign.
pub fn debtors(balances: &Balances) -> Vec<(PlayerId, Currency)> {
    partition(balances, |v| v < -EPSILON)
}

/// Players who are owed money, sorted by how much (largest first, ties by
/// id).
pub fn creditors(balances: &Balances) -> Vec<(PlayerId, Currency)> {
    partition(balances, |v| v > EPSILON)
}

fn partition(balances: &Balances, keep: impl Fn(Currency) -> bool) -> Vec<(PlayerId, Currency)> {
    let mut side = balances
        .iter()
        .filter(|(_, v)| keep(**v))
        .map(|(p, v)| (p.clone(), *v))
        .collect::<Vec<(PlayerId, Currency)>>();
    side.sort_by(|(pa, va), (pb, vb)| {
        vb.abs()
            .partial_cmp(&va.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| pa.cmp(pb))
    });
    side
}

/// Net between exactly two users. Positive means `a` owes `b`.
pub fn pairwise(a: &str, b: &str, entries: &[LedgerEntry]) -> Currency {
    entries.iter().fold(0.0, |net, e| {
        if e.from() == a && e.to() == b {
            net + e.amount()
        } else if e.from() == b && e.to() == a {
            net - e.amount()
        } else {
            net
        }
    })
}

/// Net position between a canonical pair of users: positive `net` means
/// `a` (the lexicographically smaller id) owes `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairBalance {
    pub a: PlayerId,
    pub b: PlayerId,
    pub net: Currency,
}

/// All open pairwise positions, one row per unordered pair.
///
/// Pairs are keyed with the smaller id first so the same pair never
/// appears in both directions; pairs that net to exactly zero are
/// dropped.
pub fn pairwise_all(entries: &[LedgerEntry]) -> Vec<PairBalance> {
    let mut pairs = BTreeMap::<(PlayerId, PlayerId), Currency>::new();
    for e in entries.iter().filter(|e| !e.is_settled()) {
        let (key, signed) = if e.from() < e.to() {
            ((e.from().clone(), e.to().clone()), e.amount())
        } else {
            ((e.to().clone(), e.from().clone()), -e.amount())
        };
        *pairs.entry(key).or_insert(0.0) += signed;
    }
    pairs
        .into_iter()
        .filter(|(_, net)| net.abs() > EPSILON)
        .map(|((a, b), net)| PairBalance { a, b, net })
        .collect()
}

/// True if the user still owes anyone anything on open rows.
pub fn has_unsettled_debt(user: &str, entries: &[LedgerEntry]) -> bool {
    unsettled_balances(entries).net(user) < -EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebet::BetKind;
    use crate::ID;
    use chrono::DateTime;
    use chrono::Utc;

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn row(from: &str, to: &str, amount: Currency) -> LedgerEntry {
        LedgerEntry::try_new(
            ID::default(),
            ID::default(),
            BetKind::Greenie,
            from.to_string(),
            to.to_string(),
            amount,
            at(),
        )
        .unwrap()
    }

    fn ledger() -> Vec<LedgerEntry> {
        vec![
            row("b", "a", 10.0),
            row("c", "a", 5.0),
            row("a", "c", 2.0),
            row("c", "b", 1.0),
        ]
    }

    /// credits positive, debits negative, strangers flat
    #[test]
    fn user_balance_signs() {
        let entries = ledger();
        assert_eq!(user_balance("a", &entries), 13.0);
        assert_eq!(user_balance("b", &entries), -9.0);
        assert_eq!(user_balance("c", &entries), -4.0);
        assert_eq!(user_balance("nobody", &entries), 0.0);
    }

    /// every party appears and the map is zero-sum
    #[test]
    fn match_balances_cover_all_parties() {
        let balances = match_balances(&ledger());
        assert_eq!(balances.len(), 3);
        assert!(balances.is_zero_sum());
        assert_eq!(balances.net("a"), 13.0);
    }

    /// totals on empty input are empty, not errors
    #[test]
    fn empty_input_is_total() {
        assert_eq!(user_balance("a", &[]), 0.0);
        assert!(match_balances(&[]).is_empty());
        assert!(pairwise_all(&[]).is_empty());
        assert!(!has_unsettled_debt("a", &[]));
    }

    /// settled rows drop out of the unsettled view
    #[test]
    fn settled_rows_are_excluded() {
        let mut entries = ledger();
        entries[0] = entries[0].clone().settle(at());
        let open = unsettled_balances(&entries);
        assert_eq!(open.net("a"), 3.0);
        assert_eq!(open.net("b"), 1.0);
        assert!(open.is_zero_sum());
    }

    /// partitions are sorted by magnitude and keep their signs
    #[test]
    fn debtor_creditor_partitions() {
        let balances = match_balances(&ledger());
        let owing = debtors(&balances);
        let owed = creditors(&balances);
        assert_eq!(owing[0], ("b".to_string(), -9.0));
        assert_eq!(owing[1], ("c".to_string(), -4.0));
        assert_eq!(owed, vec![("a".to_string(), 13.0)]);
    }

    /// positive means the first argument owes the second
    #[test]
    fn pairwise_sign_convention() {
        let entries = ledger();
        assert_eq!(pairwise("a", "c", &entries), -3.0);
        assert_eq!(pairwise("c", "a", &entries), 3.0);
        assert_eq!(pairwise("a", "b", &entries), -10.0);
        assert_eq!(pairwise("b", "c", &entries), -1.0);
    }

    /// summation order cannot matter
    #[test]
    fn order_independence() {
        let mut entries = ledger();
        let forward = match_balances(&entries);
        entries.reverse();
        assert_eq!(match_balances(&entries), forward);
    }

    /// canonical pairs, one direction each, zero pairs dropped
    #[test]
    fn pairwise_all_canonical() {
        let entries = vec![
            row("b", "a", 10.0),
            row("a", "b", 10.0), // cancels to zero
            row("c", "a", 5.0),
        ];
        let pairs = pairwise_all(&entries);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].a, "a");
        assert_eq!(pairs[0].b, "c");
        assert_eq!(pairs[0].net, -5.0); // c owes a
    }

    #[test]
    fn unsettled_debt_predicate() {
        let entries = ledger();
        assert!(has_unsettled_debt("b", &entries));
        assert!(!has_unsettled_debt("a", &entries));
    }
}

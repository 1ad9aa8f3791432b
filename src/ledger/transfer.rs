use super::*;
use crate::settle::Balances;
use crate::sidebet::BetKind;
use crate::Currency;
use crate::PlayerId;
use crate::EPSILON;
use crate::ID;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A directional payment suggestion produced by debt simplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Currency,
}

/// Collapses a zero-sum balance map into a short list of directional
/// transfers that pays everyone off.
///
/// Greedy matching of the largest debtor against the largest creditor:
/// at most n-1 transfers, every amount positive, and applying the list
/// returns every balance to zero. Ties in magnitude break by id, so the
/// output is deterministic regardless of input order. Rejects maps that
/// do not sum to zero; those never came from a valid settlement.
pub fn simplify(balances: &Balances) -> anyhow::Result<Vec<Transfer>> {
    if !balances.is_zero_sum() {
        return Err(anyhow::anyhow!(
            "cannot simplify unbalanced ledger: {:+}",
            balances.total()
        ));
    }
    let mut owing = debtors(balances)
        .into_iter()
        .map(|(p, v)| (p, -v))
        .collect::<Vec<(PlayerId, Currency)>>();
    let mut owed = creditors(balances);
    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < owing.len() && j < owed.len() {
        let amount = owing[i].1.min(owed[j].1);
        transfers.push(Transfer {
            from: owing[i].0.clone(),
            to: owed[j].0.clone(),
            amount,
        });
        owing[i].1 -= amount;
        owed[j].1 -= amount;
        if owing[i].1 <= EPSILON {
            i += 1;
        }
        if owed[j].1 <= EPSILON {
            j += 1;
        }
    }
    Ok(transfers)
}

/// Materializes transfers as open ledger rows for persistence.
pub fn materialize(
    transfers: &[Transfer],
    match_id: ID<Match>,
    bet_id: ID<Bet>,
    bet: BetKind,
    at: DateTime<Utc>,
) -> anyhow::Result<Vec<LedgerEntry>> {
    transfers
        .iter()
        .map(|t| {
            LedgerEntry::try_new(match_id, bet_id, bet, t.from.clone(), t.to.clone(), t.amount, at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(pairs: &[(&str, Currency)]) -> Balances {
        pairs.iter().map(|(p, v)| (p.to_string(), *v)).collect()
    }

    fn apply(balances: &Balances, transfers: &[Transfer]) -> Balances {
        let mut after = balances.clone();
        for t in transfers {
            after.credit(&t.from, t.amount);
            after.debit(&t.to, t.amount);
        }
        after
    }

    /// applying the plan pays everyone off
    #[test]
    fn plan_zeroes_every_balance() {
        let balances = balances(&[("a", 13.0), ("b", -9.0), ("c", -4.0)]);
        let transfers = simplify(&balances).unwrap();
        let after = apply(&balances, &transfers);
        assert!(after.iter().all(|(_, v)| v.abs() <= EPSILON));
        assert!(transfers.iter().all(|t| t.amount > 0.0));
        assert!(transfers.len() <= 2);
    }

    /// largest debtor pays the largest creditor first
    #[test]
    fn greedy_ordering() {
        let balances = balances(&[("a", 60.0), ("b", 40.0), ("c", -70.0), ("d", -30.0)]);
        let transfers = simplify(&balances).unwrap();
        assert_eq!(transfers[0].from, "c");
        assert_eq!(transfers[0].to, "a");
        assert_eq!(transfers[0].amount, 60.0);
    }

    #[test]
    fn flat_ledgers_need_no_transfers() {
        let balances = balances(&[("a", 0.0), ("b", 0.0)]);
        assert!(simplify(&balances).unwrap().is_empty());
        assert!(simplify(&Balances::default()).unwrap().is_empty());
    }

    #[test]
    fn rejects_unbalanced_input() {
        let balances = balances(&[("a", 5.0), ("b", -2.0)]);
        assert!(simplify(&balances).is_err());
    }

    /// same map, same plan, input order notwithstanding
    #[test]
    fn plan_is_deterministic() {
        let forward = balances(&[("a", 10.0), ("b", 10.0), ("c", -20.0)]);
        let reverse = balances(&[("c", -20.0), ("b", 10.0), ("a", 10.0)]);
        assert_eq!(simplify(&forward).unwrap(), simplify(&reverse).unwrap());
    }

    /// materialized rows are open and carry the bet kind
    #[test]
    fn materialized_rows_are_open() {
        let at = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let balances = balances(&[("a", 6.0), ("b", -6.0)]);
        let transfers = simplify(&balances).unwrap();
        let rows = materialize(&transfers, ID::default(), ID::default(), BetKind::Sandy, at).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_settled());
        assert_eq!(rows[0].bet(), BetKind::Sandy);
        assert_eq!(rows[0].from(), "b");
        assert_eq!(rows[0].to(), "a");
        assert_eq!(rows[0].created_at(), at);
    }

    /// transfers reconcile with the balance calculator end to end
    #[test]
    fn round_trip_through_ledger() {
        let at = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let balances = balances(&[("a", 13.0), ("b", -9.0), ("c", -4.0)]);
        let transfers = simplify(&balances).unwrap();
        let rows = materialize(&transfers, ID::default(), ID::default(), BetKind::Greenie, at).unwrap();
        let recovered = match_balances(&rows);
        for (player, net) in balances.iter() {
            assert!((recovered.net(player) - net).abs() <= EPSILON);
        }
    }
}

use tracing::debug;

use crate::balance::tally;
use crate::schemas::{Expense, MemberName, Transaction};

// Running balances below this are considered settled.
const SETTLED_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug)]
pub(crate) struct PersonalBalance<'a> {
    pub id: &'a str,
    pub balance: f64,
}

pub(crate) fn round_to_2_decimals(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

// Greedy pairing of the biggest creditor with the biggest debtor.
// `receivers` are owed money (positive balances), `payers` owe it (negative).
pub(crate) fn get_simplified_exchanges(
    mut receivers: Vec<PersonalBalance<'_>>,
    mut payers: Vec<PersonalBalance<'_>>,
) -> Vec<Transaction> {
    // Stable sorts, so equal balances keep member-list order
    receivers.sort_by(|a, b| b.balance.total_cmp(&a.balance));
    payers.sort_by(|a, b| a.balance.total_cmp(&b.balance));

    let mut exchanges = Vec::new();
    let (mut r, mut p) = (0, 0);

    while r < receivers.len() && p < payers.len() {
        let receiver = &mut receivers[r];
        let payer = &mut payers[p];

        let receiver_is_smaller = receiver.balance <= -payer.balance;
        let amount = round_to_2_decimals(receiver.balance.min(-payer.balance));
        if !amount.is_finite() {
            break;
        }
        if amount > 0.0 {
            exchanges.push(Transaction {
                from: payer.id.to_string(),
                to: receiver.id.to_string(),
                amount: format!("{amount:.2}"),
            });
        }
        receiver.balance -= amount;
        payer.balance += amount;

        let mut receiver_done = receiver.balance.abs() < SETTLED_TOLERANCE;
        let mut payer_done = payer.balance.abs() < SETTLED_TOLERANCE;
        // At huge magnitudes rounding can leave more than a cent behind;
        // the smaller side was meant to be fully settled either way.
        if !receiver_done && !payer_done {
            receiver_done = receiver_is_smaller;
            payer_done = !receiver_is_smaller;
        }
        if receiver_done {
            r += 1;
        }
        if payer_done {
            p += 1;
        }
    }
    exchanges
}

pub(crate) fn split_by_sign<'a>(
    members: &[&'a str],
    net_amounts: &[f64],
) -> (Vec<PersonalBalance<'a>>, Vec<PersonalBalance<'a>>) {
    let mut receivers = Vec::new();
    let mut payers = Vec::new();
    for (&id, &balance) in members.iter().zip(net_amounts) {
        let person = PersonalBalance { id, balance };
        if balance > 0.0 {
            receivers.push(person);
        } else if balance < 0.0 {
            payers.push(person);
        }
    }
    (receivers, payers)
}

/// Payments that bring every member's balance back to zero, assuming the
/// group's spending is shared equally.
///
/// Never fails: missing members, blank names, and expenses with an unknown
/// payer or unusable amount are skipped. Amounts are formatted with two
/// decimals, in the order they were generated.
pub fn compute_settlement(expenses: &[Expense], members: &[MemberName]) -> Vec<Transaction> {
    if expenses.is_empty() || members.is_empty() {
        return Vec::new();
    }
    let Some(tally) = tally(expenses, members) else {
        return Vec::new();
    };
    let (receivers, payers) = split_by_sign(&tally.members, &tally.net_amounts());
    debug!(
        receivers = receivers.len(),
        payers = payers.len(),
        ignored = tally.ignored.len(),
        "computing settlement"
    );
    get_simplified_exchanges(receivers, payers)
}

use serde::Serialize;
use tracing::warn;

use crate::balance::{tally, IgnoredExpense};
use crate::error::SettlementError;
use crate::exchange::{get_simplified_exchanges, split_by_sign};
use crate::schemas::{Balance, Expense, MemberName, Transaction};

/// Settlement together with what went into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SettlementReport {
    pub transactions: Vec<Transaction>,
    pub balances: Vec<Balance>,
    pub ignored: Vec<IgnoredExpense>,
}

/// Same transactions as [`compute_settlement`](crate::compute_settlement),
/// plus the balances and every expense that was skipped, with the reason.
pub fn settle_with_report(expenses: &[Expense], members: &[MemberName]) -> SettlementReport {
    let Some(tally) = tally(expenses, members) else {
        return SettlementReport::default();
    };
    let net_amounts = tally.net_amounts();
    let balances = tally
        .members
        .iter()
        .zip(&net_amounts)
        .map(|(member, net_amount)| Balance {
            member: member.to_string(),
            net_amount: *net_amount,
        })
        .collect();
    let transactions = if expenses.is_empty() {
        Vec::new()
    } else {
        let (receivers, payers) = split_by_sign(&tally.members, &net_amounts);
        get_simplified_exchanges(receivers, payers)
    };
    if !tally.ignored.is_empty() {
        warn!(count = tally.ignored.len(), "some expenses were left out of the settlement");
    }
    SettlementReport {
        transactions,
        balances,
        ignored: tally.ignored,
    }
}

/// Like [`compute_settlement`](crate::compute_settlement), but refuses input
/// the lenient path would quietly work around.
pub fn settle_strict(
    expenses: &[Expense],
    members: &[MemberName],
) -> Result<Vec<Transaction>, SettlementError> {
    let report = settle_with_report(expenses, members);
    if report.balances.is_empty() {
        return Err(SettlementError::NoValidMembers);
    }
    if let Some(first) = report.ignored.first() {
        return Err(SettlementError::IgnoredExpense {
            id: first.expense_id.clone(),
            reason: first.reason,
        });
    }
    let negative = expenses.iter().find_map(|expense| {
        let amount = expense.amount.as_ref()?.value()?;
        (amount < 0.0).then(|| (expense.id.clone(), amount))
    });
    if let Some((id, amount)) = negative {
        return Err(SettlementError::NegativeAmount { id, amount });
    }
    Ok(report.transactions)
}

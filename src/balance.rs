use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::schemas::{Balance, Expense, MemberName};

// Cents stay exact in an f64 below this.
pub(crate) const MAX_AMOUNT: f64 = 1e13;

/// Why an expense did not count towards anybody's spending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IgnoreReason {
    MissingPayer,
    UnknownPayer,
    MissingAmount,
    ZeroAmount,
    InvalidAmount,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IgnoreReason::MissingPayer => "expense has no payer",
            IgnoreReason::UnknownPayer => "payer is not a member of the group",
            IgnoreReason::MissingAmount => "expense has no amount",
            IgnoreReason::ZeroAmount => "amount is zero",
            IgnoreReason::InvalidAmount => "amount is not a usable number",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredExpense {
    pub expense_id: String,
    pub reason: IgnoreReason,
}

/// Spending per valid member, in member-list order.
#[derive(Debug)]
pub(crate) struct Tally<'a> {
    pub members: Vec<&'a str>,
    pub total_spent: Vec<f64>,
    pub ignored: Vec<IgnoredExpense>,
}

impl Tally<'_> {
    pub fn fair_share(&self) -> f64 {
        let total: f64 = self.total_spent.iter().sum();
        total / self.members.len() as f64
    }

    pub fn net_amounts(&self) -> Vec<f64> {
        let fair_share = self.fair_share();
        self.total_spent
            .iter()
            .map(|spent| spent - fair_share)
            .collect()
    }
}

// Blank names are not members; repeated names are the same member.
pub(crate) fn valid_members(members: &[MemberName]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(members.len());
    for member in members {
        if member.trim().is_empty() || seen.contains(&member.as_str()) {
            continue;
        }
        seen.push(member.as_str());
    }
    seen
}

pub(crate) fn classify(
    expense: &Expense,
    index_of: &HashMap<&str, usize>,
) -> Result<(usize, f64), IgnoreReason> {
    let payer = match expense.payer.as_deref() {
        Some(payer) if !payer.trim().is_empty() => payer,
        _ => return Err(IgnoreReason::MissingPayer),
    };
    let index = *index_of.get(payer).ok_or(IgnoreReason::UnknownPayer)?;
    let amount = expense
        .amount
        .as_ref()
        .ok_or(IgnoreReason::MissingAmount)?
        .value()
        .ok_or(IgnoreReason::InvalidAmount)?;
    if !amount.is_finite() || amount.abs() > MAX_AMOUNT {
        return Err(IgnoreReason::InvalidAmount);
    }
    if amount == 0.0 {
        return Err(IgnoreReason::ZeroAmount);
    }
    Ok((index, amount))
}

/// Sums what each valid member paid. `None` when no member is valid.
pub(crate) fn tally<'a>(expenses: &[Expense], members: &'a [MemberName]) -> Option<Tally<'a>> {
    let members = valid_members(members);
    if members.is_empty() {
        return None;
    }
    let index_of: HashMap<&str, usize> = members
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();

    let mut total_spent = vec![0.0; members.len()];
    let mut ignored = Vec::new();
    for expense in expenses {
        match classify(expense, &index_of) {
            Ok((index, amount)) => total_spent[index] += amount,
            Err(reason) => {
                debug!(expense = %expense.id, %reason, "expense ignored");
                ignored.push(IgnoredExpense {
                    expense_id: expense.id.clone(),
                    reason,
                });
            }
        }
    }

    Some(Tally {
        members,
        total_spent,
        ignored,
    })
}

/// Net amount per valid member: what they paid minus the fair share.
/// Positive means the member is owed money.
///
/// The fair share divides total spending by the number of distinct valid
/// names, so a name listed twice is one member with one share.
pub fn compute_balances(expenses: &[Expense], members: &[MemberName]) -> Vec<Balance> {
    let Some(tally) = tally(expenses, members) else {
        return Vec::new();
    };
    tally
        .members
        .iter()
        .zip(tally.net_amounts())
        .map(|(member, net_amount)| Balance {
            member: member.to_string(),
            net_amount,
        })
        .collect()
}

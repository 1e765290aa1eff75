use std::collections::HashMap;

use evensplit::{compute_balances, compute_settlement, settle_with_report, Expense, MemberName};
use proptest::prelude::*;

const POOL: [&str; 8] = ["Ana", "Bruno", "Carla", "Dani", "", "  ", "Eve", "Ana"];

fn members_from(mask: u8) -> Vec<MemberName> {
    POOL.iter()
        .enumerate()
        .filter(|(idx, _)| mask & (1 << idx) != 0)
        .map(|(_, name)| name.to_string())
        .collect()
}

// Payer index 8 is somebody outside the group.
fn expenses_from(entries: &[(usize, u32)]) -> Vec<Expense> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, &(payer, cents))| {
            let payer = POOL.get(payer).copied().unwrap_or("Zoe");
            Expense::new(idx.to_string(), payer, f64::from(cents) / 100.0)
        })
        .collect()
}

fn inputs() -> impl Strategy<Value = (Vec<Expense>, Vec<MemberName>)> {
    (
        any::<u8>(),
        prop::collection::vec((0usize..=8, 0u32..=50_000), 0..=25),
    )
        .prop_map(|(mask, entries)| (expenses_from(&entries), members_from(mask)))
}

fn wide_amounts() -> impl Strategy<Value = Vec<(usize, f64)>> {
    let amount = prop_oneof![0.01f64..1e6, 1e9f64..1e13, 1e13f64..1e308];
    prop::collection::vec((0usize..=3, amount), 0..=12)
}

proptest! {
    #[test]
    fn any_magnitude_settles_with_finite_amounts(entries in wide_amounts()) {
        let members = members_from(0b1111);
        let expenses: Vec<Expense> = entries
            .iter()
            .enumerate()
            .map(|(idx, &(payer, amount))| Expense::new(idx.to_string(), POOL[payer], amount))
            .collect();
        for transaction in compute_settlement(&expenses, &members) {
            let (_, decimals) = transaction.amount.split_once('.').expect("decimal point");
            prop_assert_eq!(decimals.len(), 2);
            let amount: f64 = transaction.amount.parse().expect("numeric amount");
            prop_assert!(amount.is_finite() && amount > 0.0);
        }
    }

    #[test]
    fn amounts_have_two_decimals_and_are_positive((expenses, members) in inputs()) {
        for transaction in compute_settlement(&expenses, &members) {
            let (_, decimals) = transaction.amount.split_once('.').expect("decimal point");
            prop_assert_eq!(decimals.len(), 2);
            let amount: f64 = transaction.amount.parse().expect("numeric amount");
            prop_assert!(amount > 0.0);
            prop_assert_ne!(transaction.from, transaction.to);
        }
    }

    #[test]
    fn transfers_settle_every_balance((expenses, members) in inputs()) {
        let balances = compute_balances(&expenses, &members);
        let transactions = compute_settlement(&expenses, &members);

        let mut moved: HashMap<&str, f64> = HashMap::new();
        for transaction in &transactions {
            let amount: f64 = transaction.amount.parse().expect("numeric amount");
            *moved.entry(transaction.to.as_str()).or_default() += amount;
            *moved.entry(transaction.from.as_str()).or_default() -= amount;
        }

        let tolerance = 0.01 * balances.len() as f64 + 1e-6;
        for balance in &balances {
            let settled = moved.get(balance.member.as_str()).copied().unwrap_or(0.0);
            prop_assert!(
                (settled - balance.net_amount).abs() <= tolerance,
                "{} settled {} of {}", balance.member, settled, balance.net_amount
            );
        }
    }

    #[test]
    fn money_flows_from_debtors_to_creditors((expenses, members) in inputs()) {
        let balances: HashMap<String, f64> = compute_balances(&expenses, &members)
            .into_iter()
            .map(|b| (b.member, b.net_amount))
            .collect();
        let transactions = compute_settlement(&expenses, &members);

        let creditors = balances.values().filter(|b| **b > 0.0).count();
        let debtors = balances.values().filter(|b| **b < 0.0).count();
        prop_assert!(transactions.len() <= (creditors + debtors).saturating_sub(1));

        for transaction in &transactions {
            prop_assert!(balances[&transaction.from] < 0.0);
            prop_assert!(balances[&transaction.to] > 0.0);
        }
    }

    #[test]
    fn settlement_is_repeatable_and_leaves_inputs_alone((expenses, members) in inputs()) {
        let (expenses_before, members_before) = (expenses.clone(), members.clone());
        let first = compute_settlement(&expenses, &members);
        let second = compute_settlement(&expenses, &members);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&expenses, &expenses_before);
        prop_assert_eq!(&members, &members_before);
        prop_assert_eq!(settle_with_report(&expenses, &members).transactions, first);
    }

    #[test]
    fn blank_member_names_are_ignored((expenses, members) in inputs()) {
        let cleaned: Vec<MemberName> = members
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        prop_assert_eq!(
            compute_settlement(&expenses, &members),
            compute_settlement(&expenses, &cleaned)
        );
    }
}

#[test]
fn group_dinner_settles_in_three_payments() {
    let members: Vec<MemberName> = ["Ana", "Bruno", "Carla", "Dani"]
        .iter()
        .map(|n| n.to_string())
        .collect();
    let expenses = vec![
        Expense::new("1", "Ana", 120.0),
        Expense::new("2", "Bruno", 45.5),
        Expense::new("3", "Ana", 14.5),
        Expense::new("4", "Zoe", 300.0),
    ];
    // total 180, share 45: Ana +89.5, Bruno +0.5, Carla -45, Dani -45
    let transactions = compute_settlement(&expenses, &members);
    let rendered: Vec<(&str, &str, &str)> = transactions
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount.as_str()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Carla", "Ana", "45.00"),
            ("Dani", "Ana", "44.50"),
            ("Dani", "Bruno", "0.50"),
        ]
    );
}

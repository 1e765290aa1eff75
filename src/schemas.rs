use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type MemberName = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberName>,
}

/// Amount as it arrives from the expense store. Older clients wrote numeric
/// strings, so both shapes are accepted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Numeric value, `None` when the text does not parse.
    pub fn value(&self) -> Option<f64> {
        match self {
            RawAmount::Number(n) => Some(*n),
            RawAmount::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub payer: Option<MemberName>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn new(id: impl Into<String>, payer: impl Into<MemberName>, amount: f64) -> Self {
        Expense {
            id: id.into(),
            group_id: String::new(),
            description: String::new(),
            amount: Some(amount.into()),
            payer: Some(payer.into()),
            created_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub member: MemberName,
    pub net_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transaction {
    pub from: MemberName,
    pub to: MemberName,
    pub amount: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Campaign as seen by the package selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageCampaign {
    pub id: String,
    pub name: String,
    pub packages: Vec<Package>,
}

/// Campaign as seen by the status display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCampaign {
    pub id: String,
    pub goals: Vec<Goal>,
    pub status: Status,
    pub end_date: DateTime<Utc>,
}

/// A purchasable pledge tier bundling one or more options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub options: Vec<PackageOption>,
}

/// A line item within a package with a bounded quantity and a reward.
///
/// Prices are in minor currency units (Rappen).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageOption {
    pub id: String,
    pub price: u64,
    /// The pledger names the price; the unit price is only a suggestion.
    #[serde(default, deserialize_with = "null_as_false")]
    pub user_price: bool,
    pub min_amount: u32,
    pub max_amount: u32,
    pub default_amount: u32,
    #[serde(default)]
    pub reward: Option<Reward>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "__typename")]
pub enum Reward {
    MembershipType { id: String, name: String },
    Goodie { id: String, name: String },
}

impl Reward {
    pub fn id(&self) -> &str {
        match self {
            Reward::MembershipType { id, .. } | Reward::Goodie { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Reward::MembershipType { name, .. } | Reward::Goodie { name, .. } => name,
        }
    }
}

/// A campaign milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub people: u64,
    pub money: u64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Totals achieved so far.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Status {
    pub people: u64,
    pub money: u64,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

use std::collections::BTreeMap;

use crate::{Package, PackageOption};

/// Smallest pledge the campaign accepts, in minor units.
pub const MIN_PLEDGE: u64 = 100;

/// Chosen quantity per option id.
pub type Quantities = BTreeMap<String, u32>;

impl PackageOption {
    /// Whether the pledger can choose a quantity for this option.
    pub fn is_configurable(&self) -> bool {
        self.min_amount != self.max_amount
    }

    pub fn accepts(&self, quantity: i64) -> bool {
        quantity >= i64::from(self.min_amount) && quantity <= i64::from(self.max_amount)
    }
}

impl Package {
    pub fn configurable_options(&self) -> impl Iterator<Item = &PackageOption> {
        self.options.iter().filter(|option| option.is_configurable())
    }

    pub fn has_options(&self) -> bool {
        self.configurable_options().next().is_some()
    }

    /// Price of the package with every option at its minimum quantity.
    pub fn base_price(&self) -> u64 {
        self.options
            .iter()
            .map(|option| option.price * u64::from(option.min_amount))
            .sum()
    }

    /// Total the selector starts from when the package is expanded.
    pub fn default_total(&self) -> u64 {
        self.options
            .iter()
            .map(|option| option.price * u64::from(option.default_amount))
            .sum()
    }

    pub fn default_quantities(&self) -> Quantities {
        self.configurable_options()
            .map(|option| (option.id.clone(), option.default_amount))
            .collect()
    }

    pub fn option(&self, option_id: &str) -> Option<&PackageOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Smallest valid total for `package` given the chosen quantities.
///
/// Options without a chosen quantity count at their minimum. User-priced options
/// contribute nothing, and the result never drops below [`MIN_PLEDGE`].
pub fn calculate_min_amount(package: &Package, quantities: &Quantities) -> u64 {
    let sum: u64 = package
        .options
        .iter()
        .filter(|option| !option.user_price)
        .map(|option| {
            let quantity = quantities
                .get(&option.id)
                .copied()
                .unwrap_or(option.min_amount);
            option.price * u64::from(quantity)
        })
        .sum();

    sum.max(MIN_PLEDGE)
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Package;
use crate::format::parse_minor_units;
use crate::pricing::{Quantities, calculate_min_amount};

/// Package expanded before the pledger touches anything.
pub const DEFAULT_ACTIVE_INDEX: usize = 2;

/// View state of the package selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Package the pointer last rested on.
    pub active_index: Option<usize>,
    pub selected_index: Option<usize>,
    pub quantities: Quantities,
    /// Pledge total in minor units, set once a package is selected.
    pub amount: Option<u64>,
    /// The pledger typed the total themselves.
    pub amount_custom: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Some(DEFAULT_ACTIVE_INDEX))
    }
}

impl SelectionState {
    pub fn new(active_index: Option<usize>) -> Self {
        Self {
            active_index,
            selected_index: None,
            quantities: Quantities::new(),
            amount: None,
            amount_custom: false,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == Some(index)
    }

    /// Whether the package body is shown.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.is_selected(index) || self.active_index == Some(index)
    }

    pub fn quantity(&self, option_id: &str) -> Option<u32> {
        self.quantities.get(option_id).copied()
    }

    /// Minimum total for the selected package.
    pub fn min_amount(&self, packages: &[Package]) -> Option<u64> {
        let package = packages.get(self.selected_index?)?;
        Some(calculate_min_amount(package, &self.quantities))
    }

    /// The selected package can be confirmed with the current total.
    pub fn can_confirm(&self, packages: &[Package]) -> bool {
        match (self.amount, self.min_amount(packages)) {
            (Some(amount), Some(min)) => amount >= min,
            _ => false,
        }
    }

    pub fn apply(&mut self, packages: &[Package], event: SelectionEvent) -> Option<SelectionParams> {
        let Reduction { state, emit } = reduce(self, packages, event);
        *self = state;
        emit
    }
}

/// User interactions the selector reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Hover { index: usize },
    Click { index: usize },
    /// Raw text from an option's quantity field.
    QuantityChanged { index: usize, option_id: String, value: String },
    /// Raw text from the total field, in francs.
    AmountChanged { index: usize, value: String },
    Confirm { index: usize },
}

/// Parameters handed to the caller once a package is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionParams {
    pub amount: u64,
    pub package: String,
    #[serde(flatten)]
    pub options: BTreeMap<String, u32>,
}

/// Outcome of a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub state: SelectionState,
    pub emit: Option<SelectionParams>,
}

impl Reduction {
    fn keep(state: &SelectionState) -> Self {
        Self {
            state: state.clone(),
            emit: None,
        }
    }
}

/// Computes the next selector state for `event`.
pub fn reduce(state: &SelectionState, packages: &[Package], event: SelectionEvent) -> Reduction {
    match event {
        SelectionEvent::Hover { index } => {
            if index >= packages.len() || state.active_index == Some(index) {
                return Reduction::keep(state);
            }
            Reduction {
                state: SelectionState {
                    active_index: Some(index),
                    ..state.clone()
                },
                emit: None,
            }
        }
        SelectionEvent::Click { index } => {
            let Some(package) = packages.get(index) else {
                return Reduction::keep(state);
            };
            if !package.has_options() {
                return Reduction {
                    state: state.clone(),
                    emit: Some(select(state, index, package)),
                };
            }
            if state.is_selected(index) {
                return Reduction::keep(state);
            }
            Reduction {
                state: SelectionState {
                    active_index: state.active_index,
                    selected_index: Some(index),
                    quantities: package.default_quantities(),
                    amount: Some(package.default_total()),
                    amount_custom: false,
                },
                emit: None,
            }
        }
        SelectionEvent::QuantityChanged {
            index,
            option_id,
            value,
        } => {
            if !state.is_selected(index) {
                tracing::debug!("Ignoring quantity for package {} that is not selected", index);
                return Reduction::keep(state);
            }
            let Some(package) = packages.get(index) else {
                return Reduction::keep(state);
            };
            let Some(option) = package.option(&option_id) else {
                return Reduction::keep(state);
            };
            let Ok(quantity) = value.trim().parse::<i64>() else {
                tracing::debug!("Ignoring non-numeric quantity {:?} for {}", value, option_id);
                return Reduction::keep(state);
            };
            if !option.accepts(quantity) {
                tracing::debug!(
                    "Ignoring quantity {} for {}: outside {}..={}",
                    quantity,
                    option_id,
                    option.min_amount,
                    option.max_amount
                );
                return Reduction::keep(state);
            }

            let mut next = state.clone();
            // accepts() bounds the value by a u32 maximum
            next.quantities.insert(option_id, quantity as u32);

            let min_amount = calculate_min_amount(package, &next.quantities);
            let current = next.amount.unwrap_or(0);
            if !next.amount_custom || min_amount > current {
                next.amount = Some(min_amount);
                next.amount_custom = false;
            }
            Reduction {
                state: next,
                emit: None,
            }
        }
        SelectionEvent::AmountChanged { index, value } => {
            if !state.is_selected(index) {
                tracing::debug!("Ignoring amount for package {} that is not selected", index);
                return Reduction::keep(state);
            }
            let Some(amount) = parse_minor_units(&value) else {
                tracing::debug!("Ignoring unparsable amount {:?}", value);
                return Reduction::keep(state);
            };
            Reduction {
                state: SelectionState {
                    amount: Some(amount),
                    amount_custom: true,
                    ..state.clone()
                },
                emit: None,
            }
        }
        SelectionEvent::Confirm { index } => {
            let Some(package) = packages.get(index) else {
                return Reduction::keep(state);
            };
            if !state.is_selected(index) || !state.can_confirm(packages) {
                return Reduction::keep(state);
            }
            Reduction {
                state: state.clone(),
                emit: Some(select(state, index, package)),
            }
        }
    }
}

fn select(state: &SelectionState, index: usize, package: &Package) -> SelectionParams {
    let amount = match state.amount {
        Some(amount) if state.is_selected(index) => amount,
        _ => package.base_price(),
    };

    let options = package
        .configurable_options()
        .filter_map(|option| {
            state
                .quantity(&option.id)
                .map(|quantity| (option.id.clone(), quantity))
        })
        .collect();

    SelectionParams {
        amount,
        package: package.name.clone(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tests::{option, package};

    fn packages() -> Vec<Package> {
        let mut donation = option("donation", 0, 1, 1, 1);
        donation.user_price = true;
        vec![
            package("DONATE", vec![donation]),
            package("POSTER", vec![option("poster", 1000, 1, 1, 1)]),
            package("ABO", vec![option("abo", 24000, 1, 1, 1)]),
            package(
                "ABO_GIVE",
                vec![
                    option("abo-give", 24000, 1, 100, 1),
                    option("notebook", 2000, 0, 100, 1),
                ],
            ),
        ]
    }

    fn quantity(index: usize, option_id: &str, value: &str) -> SelectionEvent {
        SelectionEvent::QuantityChanged {
            index,
            option_id: option_id.to_string(),
            value: value.to_string(),
        }
    }

    fn amount(index: usize, value: &str) -> SelectionEvent {
        SelectionEvent::AmountChanged {
            index,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_default_state_expands_featured_package() {
        let state = SelectionState::default();
        assert!(state.is_expanded(DEFAULT_ACTIVE_INDEX));
        assert!(!state.is_expanded(0));
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_hover_moves_active_package() {
        let packages = packages();
        let mut state = SelectionState::default();

        assert_eq!(state.apply(&packages, SelectionEvent::Hover { index: 1 }), None);
        assert_eq!(state.active_index, Some(1));
        assert!(!state.is_expanded(DEFAULT_ACTIVE_INDEX));
    }

    #[test]
    fn test_hover_on_active_package_is_a_no_op() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });

        for index in [DEFAULT_ACTIVE_INDEX, 99] {
            let reduction = reduce(&state, &packages, SelectionEvent::Hover { index });
            assert_eq!(reduction.state, state);
            assert_eq!(reduction.emit, None);
        }
    }

    #[test]
    fn test_click_without_options_emits_immediately() {
        let packages = packages();
        let state = SelectionState::default();

        let reduction = reduce(&state, &packages, SelectionEvent::Click { index: 1 });

        assert_eq!(reduction.state, state);
        assert_eq!(
            reduction.emit,
            Some(SelectionParams {
                amount: 1000,
                package: "POSTER".to_string(),
                options: BTreeMap::new(),
            })
        );
    }

    #[test]
    fn test_click_with_options_expands_with_defaults() {
        let packages = packages();
        let mut state = SelectionState::default();

        assert_eq!(state.apply(&packages, SelectionEvent::Click { index: 3 }), None);
        assert_eq!(state.selected_index, Some(3));
        assert_eq!(state.quantity("abo-give"), Some(1));
        assert_eq!(state.quantity("notebook"), Some(1));
        assert_eq!(state.amount, Some(26000));
        assert!(state.is_expanded(3));
    }

    #[test]
    fn test_click_on_selected_package_keeps_state() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, quantity(3, "abo-give", "4"));
        let before = state.clone();

        state.apply(&packages, SelectionEvent::Click { index: 3 });
        assert_eq!(state, before);
    }

    #[test]
    fn test_quantity_change_snaps_amount_to_minimum() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });

        state.apply(&packages, quantity(3, "abo-give", "3"));
        assert_eq!(state.amount, Some(3 * 24000 + 2000));

        state.apply(&packages, quantity(3, "notebook", "0"));
        assert_eq!(state.amount, Some(3 * 24000));
        assert!(!state.amount_custom);
    }

    #[test]
    fn test_out_of_range_quantity_is_ignored() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        let before = state.clone();

        for value in ["0", "101", "-1", "", "two"] {
            let reduction = reduce(&state, &packages, quantity(3, "abo-give", value));
            assert_eq!(reduction.state, before, "value {:?}", value);
            assert_eq!(reduction.emit, None);
        }
    }

    #[test]
    fn test_override_survives_smaller_minimum() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, amount(3, "1000"));
        assert_eq!(state.amount, Some(100000));
        assert!(state.amount_custom);

        state.apply(&packages, quantity(3, "abo-give", "2"));
        assert_eq!(state.amount, Some(100000));
        assert!(state.amount_custom);
    }

    #[test]
    fn test_edits_to_unselected_package_are_ignored() {
        let mut packages = packages();
        packages.push(package("BENEFACTOR", vec![option("benefactor", 100000, 1, 5, 1)]));
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, SelectionEvent::Hover { index: 4 });
        let before = state.clone();

        state.apply(&packages, quantity(4, "benefactor", "2"));
        state.apply(&packages, amount(4, "5000"));
        assert_eq!(state, before);

        let params = state
            .apply(&packages, SelectionEvent::Confirm { index: 3 })
            .unwrap();
        assert_eq!(params.amount, 26000);
        assert_eq!(params.package, "ABO_GIVE");
        assert!(!params.options.contains_key("benefactor"));
    }

    #[test]
    fn test_override_resets_when_minimum_exceeds_it() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, amount(3, "300"));

        state.apply(&packages, quantity(3, "abo-give", "2"));
        assert_eq!(state.amount, Some(2 * 24000 + 2000));
        assert!(!state.amount_custom);
    }

    #[test]
    fn test_unparsable_amount_is_ignored() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        let before = state.clone();

        state.apply(&packages, amount(3, "lots"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_confirm_emits_amount_and_quantities() {
        let packages = packages();
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, quantity(3, "notebook", "2"));
        state.apply(&packages, amount(3, "500"));

        let params = state
            .apply(&packages, SelectionEvent::Confirm { index: 3 })
            .unwrap();

        assert_eq!(params.amount, 50000);
        assert_eq!(params.package, "ABO_GIVE");
        assert_eq!(params.options["abo-give"], 1);
        assert_eq!(params.options["notebook"], 2);
    }

    #[test]
    fn test_confirm_requires_selection_and_minimum() {
        let packages = packages();
        let mut state = SelectionState::default();

        assert_eq!(state.apply(&packages, SelectionEvent::Confirm { index: 3 }), None);

        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, amount(3, "1"));
        assert!(!state.can_confirm(&packages));
        assert_eq!(state.apply(&packages, SelectionEvent::Confirm { index: 3 }), None);
    }

    #[test]
    fn test_selecting_another_package_clears_override() {
        let mut packages = packages();
        packages.push(package("BENEFACTOR", vec![option("benefactor", 100000, 1, 5, 1)]));
        let mut state = SelectionState::default();
        state.apply(&packages, SelectionEvent::Click { index: 3 });
        state.apply(&packages, amount(3, "2000"));

        state.apply(&packages, SelectionEvent::Click { index: 4 });
        assert!(!state.amount_custom);
        assert_eq!(state.amount, Some(100000));
        assert_eq!(state.quantities.len(), 1);
        assert_eq!(state.quantity("benefactor"), Some(1));
    }

    #[test]
    fn test_params_serialize_flat() {
        let params = SelectionParams {
            amount: 26000,
            package: "ABO_GIVE".to_string(),
            options: BTreeMap::from([("notebook".to_string(), 1)]),
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "amount": 26000, "package": "ABO_GIVE", "notebook": 1 })
        );
    }
}

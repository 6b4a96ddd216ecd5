//! Upgrade ledger
//!
//! Every game sells the same kind of thing: a named stat with a current
//! value and a price that escalates after each purchase. The ledger is
//! configured from a table of [`UpgradeSpec`] rows instead of one
//! hand-written function per stat.

use serde::Serialize;

/// How a purchase changes the stat value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UpgradeEffect {
    /// Continuous stats (speed, rate, value): `value * factor`
    Multiply(f64),
    /// Count stats (lanes, workers, balls): `value + amount`
    Add(f64),
}

impl UpgradeEffect {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UpgradeEffect::Multiply(factor) => value * factor,
            UpgradeEffect::Add(amount) => value + amount,
        }
    }
}

/// One row of an upgrade table
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeSpec {
    pub name: &'static str,
    pub initial_value: f64,
    pub initial_cost: f64,
    /// Cost multiplier applied after every purchase (>= 1)
    pub cost_growth: f64,
    pub effect: UpgradeEffect,
    /// Optional ceiling for the value; purchases stop once it is reached
    pub cap: Option<f64>,
}

impl UpgradeSpec {
    /// Continuous stat: x1.1 per purchase, cost x2
    pub const fn scaling(name: &'static str, initial_value: f64, initial_cost: f64) -> Self {
        Self {
            name,
            initial_value,
            initial_cost,
            cost_growth: 2.0,
            effect: UpgradeEffect::Multiply(1.1),
            cap: None,
        }
    }

    /// Count stat: +1 per purchase, cost x2
    pub const fn counter(name: &'static str, initial_value: f64, initial_cost: f64) -> Self {
        Self {
            name,
            initial_value,
            initial_cost,
            cost_growth: 2.0,
            effect: UpgradeEffect::Add(1.0),
            cap: None,
        }
    }

    pub const fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }

    pub const fn with_effect(mut self, effect: UpgradeEffect) -> Self {
        self.effect = effect;
        self
    }

    pub const fn with_cost_growth(mut self, growth: f64) -> Self {
        self.cost_growth = growth;
        self
    }
}

/// Current value and next price of one upgrade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpgradeState {
    pub value: f64,
    pub cost: f64,
    /// Number of successful purchases
    pub level: u32,
}

/// Ordered set of upgrades (table order is display order)
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpgradeLedger {
    specs: Vec<UpgradeSpec>,
    states: Vec<UpgradeState>,
}

impl UpgradeLedger {
    pub fn new(specs: Vec<UpgradeSpec>) -> Self {
        let states = specs
            .iter()
            .map(|spec| UpgradeState {
                value: spec.initial_value,
                cost: spec.initial_cost,
                level: 0,
            })
            .collect();
        Self { specs, states }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.name == name)
    }

    /// Current state of an upgrade
    pub fn get(&self, name: &str) -> Option<&UpgradeState> {
        self.index_of(name).and_then(|i| self.states.get(i))
    }

    /// Current value of a stat, or `default` when the table has no such row
    pub fn value_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).map_or(default, |s| s.value)
    }

    /// Overwrite a state directly (scenario setup, tuning tools)
    pub fn set(&mut self, name: &str, value: f64, cost: f64) {
        if let Some(state) = self.index_of(name).and_then(|i| self.states.get_mut(i)) {
            state.value = value;
            state.cost = cost;
        }
    }

    /// True once the stat has reached its ceiling
    pub fn is_capped(&self, name: &str) -> bool {
        self.index_of(name)
            .and_then(|i| Some((self.specs.get(i)?, self.states.get(i)?)))
            .is_some_and(|(spec, state)| spec.cap.is_some_and(|cap| state.value >= cap))
    }

    /// Whether a purchase would go through right now (drives button enablement)
    pub fn can_afford(&self, name: &str, currency: f64) -> bool {
        self.get(name)
            .is_some_and(|state| currency >= state.cost && !self.is_capped(name))
    }

    /// Buy one level of `name`, paying from `currency`.
    ///
    /// Insufficient funds, a reached cap or an unknown name leave everything
    /// untouched. Returns whether the purchase happened.
    pub fn purchase(&mut self, name: &str, currency: &mut f64) -> bool {
        if !self.can_afford(name, *currency) {
            return false;
        }
        let Some(i) = self.index_of(name) else {
            return false;
        };
        let (Some(spec), Some(state)) = (self.specs.get(i), self.states.get_mut(i)) else {
            return false;
        };

        *currency -= state.cost;
        let mut value = spec.effect.apply(state.value);
        if let Some(cap) = spec.cap {
            value = value.min(cap);
        }
        state.value = value;
        state.cost *= spec.cost_growth;
        state.level += 1;

        log::debug!(
            "Purchased {} level {}: value={:.2}, next cost={:.2}",
            spec.name,
            state.level,
            state.value,
            state.cost
        );
        true
    }

    /// Iterate `(spec, state)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&UpgradeSpec, &UpgradeState)> {
        self.specs.iter().zip(self.states.iter())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

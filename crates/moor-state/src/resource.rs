//! The regrowing resource field.

use moor_core::{ConfigError, Position};
use rand::Rng;

/// Resource field parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceConfig {
    /// Row-major starting values. `None` draws a random field at every reset.
    pub initial: Option<Vec<f64>>,
    /// Amount added to every live cell per [`ResourceState::regrow`].
    pub regrow_rate: f64,
    /// Cap on any cell's value.
    pub max_value: f64,
    /// Cells below this value are depleted and stop regrowing.
    pub min_value: f64,
    /// Fraction of cells seeded when drawing a random field.
    pub coverage: f64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            initial: None,
            regrow_rate: 0.04,
            max_value: 1.0,
            min_value: 0.1,
            coverage: 0.75,
        }
    }
}

impl ResourceConfig {
    /// A field starting from fixed `values` with the given regrowth rate.
    pub fn fixed(values: Vec<f64>, regrow_rate: f64) -> Self {
        Self {
            initial: Some(values),
            regrow_rate,
            ..Self::default()
        }
    }

    /// Check parameters against a `rows * cols` grid.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ResourceShape`] if `initial` has the wrong length;
    /// [`ConfigError::InvalidParameter`] for a non-finite or negative rate,
    /// a non-positive cap, a floor outside `[0, max_value]`, a coverage
    /// outside `[0, 1]`, or an initial value outside `[0, max_value]`.
    pub fn validate(&self, rows: u32, cols: u32) -> Result<(), ConfigError> {
        let invalid = |name, reason: String| Err(ConfigError::InvalidParameter { name, reason });
        if !self.regrow_rate.is_finite() || self.regrow_rate < 0.0 {
            return invalid(
                "regrow_rate",
                format!("must be finite and >= 0, got {}", self.regrow_rate),
            );
        }
        if !self.max_value.is_finite() || self.max_value <= 0.0 {
            return invalid("max_value", format!("must be finite and > 0, got {}", self.max_value));
        }
        if !(0.0..=self.max_value).contains(&self.min_value) {
            return invalid(
                "min_value",
                format!("must lie in [0, {}], got {}", self.max_value, self.min_value),
            );
        }
        if !(0.0..=1.0).contains(&self.coverage) {
            return invalid("coverage", format!("must lie in [0, 1], got {}", self.coverage));
        }
        if let Some(values) = &self.initial {
            let expected = rows as usize * cols as usize;
            if values.len() != expected {
                return Err(ConfigError::ResourceShape {
                    expected,
                    actual: values.len(),
                });
            }
            if let Some((i, v)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=self.max_value).contains(*v))
            {
                let cell = Position::unravel(i, cols);
                return invalid(
                    "initial",
                    format!("value {v} at {cell} outside [0, {}]", self.max_value),
                );
            }
        }
        Ok(())
    }
}

/// Owns a `rows * cols` scalar field of harvestable resource.
///
/// Every cell stays within `[0, max_value]`.
#[derive(Clone, Debug)]
pub struct ResourceState {
    rows: u32,
    cols: u32,
    config: ResourceConfig,
    values: Vec<f64>,
}

impl ResourceState {
    /// Create the field, validating `config`. Values are zero until reset.
    pub fn new(rows: u32, cols: u32, config: ResourceConfig) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        config.validate(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            config,
            values: vec![0.0; rows as usize * cols as usize],
        })
    }

    /// The active parameters.
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `cell`, `None` outside the grid.
    pub fn value(&self, cell: Position) -> Option<f64> {
        cell.ravel(self.rows, self.cols).map(|i| self.values[i])
    }

    /// Restore the starting field.
    ///
    /// With fixed initial values no randomness is used. Otherwise the field
    /// is drawn from `rng` with `rows * cols` uniform draws deciding which
    /// cells are seeded (kept iff the draw is below `coverage`), followed by
    /// `rows * cols` uniform draws in `[min_value, max_value)`, both row-major.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(initial) = &self.config.initial {
            self.values.copy_from_slice(initial);
            return;
        }
        let (lo, hi) = (self.config.min_value, self.config.max_value);
        let seeded: Vec<bool> = (0..self.values.len())
            .map(|_| rng.random::<f64>() < self.config.coverage)
            .collect();
        for (v, keep) in self.values.iter_mut().zip(seeded) {
            let draw = lo + (hi - lo) * rng.random::<f64>();
            *v = if keep { draw } else { 0.0 };
        }
    }

    /// Take up to `amount` from `cell`.
    ///
    /// Returns the amount removed: `min(amount, value)`, or 0 for a
    /// non-positive request or a cell outside the grid. The cell is
    /// decremented by exactly the returned amount.
    pub fn harvest(&mut self, cell: Position, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let Some(i) = cell.ravel(self.rows, self.cols) else {
            return 0.0;
        };
        let taken = amount.min(self.values[i]);
        self.values[i] -= taken;
        taken
    }

    /// Add `regrow_rate` to every cell at or above `min_value`, capped at
    /// `max_value`. Depleted cells stay as they are.
    pub fn regrow(&mut self) {
        let ResourceConfig {
            regrow_rate,
            max_value,
            min_value,
            ..
        } = self.config;
        for v in &mut self.values {
            if *v >= min_value {
                *v = (*v + regrow_rate).min(max_value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_test_utils::fixtures::resource as fx;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture_state() -> ResourceState {
        let config = ResourceConfig::fixed(fx::initial(), fx::REGROW_RATE);
        let mut state = ResourceState::new(5, 5, config).unwrap();
        state.reset(&mut ChaCha8Rng::seed_from_u64(0));
        state
    }

    fn assert_field(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-7, "cell {i}: {a} != {e}");
        }
    }

    #[test]
    fn fixed_reset_copies_values_exactly() {
        let state = fixture_state();
        assert_eq!(state.values(), fx::initial().as_slice());
    }

    #[test]
    fn fixture_regrow_skips_depleted_cells() {
        let mut state = fixture_state();
        state.regrow();
        assert_field(state.values(), &fx::after_first_regrow());
    }

    #[test]
    fn fixture_harvest_sequence() {
        let mut state = fixture_state();
        state.regrow();

        assert_eq!(state.harvest(Position::new(0, 0), 0.5), 0.5);
        assert_eq!(state.harvest(Position::new(2, 2), 0.5), 0.0);
        assert_eq!(state.harvest(Position::new(3, 1), 0.5), 0.5);
        assert_eq!(state.harvest(Position::new(1, 4), 0.5), 0.5);
        assert_field(state.values(), &fx::after_first_harvest());

        assert_eq!(state.harvest(Position::new(0, 0), 0.5), 0.5);
        let rest = state.harvest(Position::new(3, 1), 0.5);
        assert!((rest - 0.26891643).abs() < 1e-7);
        assert_eq!(state.value(Position::new(3, 1)), Some(0.0));
        assert_eq!(state.harvest(Position::new(1, 4), 0.5), 0.5);
        assert_field(state.values(), &fx::after_second_harvest());

        state.regrow();
        assert_field(state.values(), &fx::after_second_regrow());
    }

    #[test]
    fn non_positive_request_takes_nothing() {
        let mut state = fixture_state();
        assert_eq!(state.harvest(Position::new(0, 0), 0.0), 0.0);
        assert_eq!(state.harvest(Position::new(0, 0), -1.0), 0.0);
        assert_eq!(state.harvest(Position::new(9, 9), 1.0), 0.0);
        assert_eq!(state.values(), fx::initial().as_slice());
    }

    #[test]
    fn random_field_respects_bounds_and_seed() {
        let config = ResourceConfig::default();
        let mut a = ResourceState::new(8, 8, config.clone()).unwrap();
        let mut b = ResourceState::new(8, 8, config).unwrap();
        a.reset(&mut ChaCha8Rng::seed_from_u64(5));
        b.reset(&mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a.values(), b.values());
        assert!(a.values().iter().all(|&v| v == 0.0 || (0.1..=1.0).contains(&v)));
        assert!(a.values().iter().any(|&v| v > 0.0));
    }

    #[test]
    fn zero_coverage_yields_empty_field() {
        let config = ResourceConfig {
            coverage: 0.0,
            ..ResourceConfig::default()
        };
        let mut state = ResourceState::new(3, 3, config).unwrap();
        state.reset(&mut ChaCha8Rng::seed_from_u64(1));
        assert!(state.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let bad_shape = ResourceConfig::fixed(vec![0.5; 3], 0.1);
        assert_eq!(
            bad_shape.validate(2, 2),
            Err(ConfigError::ResourceShape {
                expected: 4,
                actual: 3
            })
        );
        let negative_rate = ResourceConfig {
            regrow_rate: -0.1,
            ..ResourceConfig::default()
        };
        assert!(matches!(
            negative_rate.validate(2, 2),
            Err(ConfigError::InvalidParameter { name: "regrow_rate", .. })
        ));
        let over_cap = ResourceConfig::fixed(vec![0.5, 0.5, 1.5, 0.5], 0.1);
        assert!(matches!(
            over_cap.validate(2, 2),
            Err(ConfigError::InvalidParameter { name: "initial", .. })
        ));
        let bad_floor = ResourceConfig {
            min_value: 2.0,
            ..ResourceConfig::default()
        };
        assert!(bad_floor.validate(2, 2).is_err());
    }

    proptest! {
        #[test]
        fn harvest_conserves_resource(
            start in 0.0f64..=1.0,
            request in -1.0f64..2.0,
        ) {
            let config = ResourceConfig::fixed(vec![start], 0.0);
            let mut state = ResourceState::new(1, 1, config).unwrap();
            state.reset(&mut ChaCha8Rng::seed_from_u64(0));
            let taken = state.harvest(Position::new(0, 0), request);
            let left = state.value(Position::new(0, 0)).unwrap();
            prop_assert!(taken >= 0.0);
            prop_assert!(taken <= request.max(0.0) && taken <= start);
            prop_assert!((taken + left - start).abs() <= 1e-12);
        }

        #[test]
        fn regrow_stays_bounded(
            seed in any::<u64>(),
            rate in 0.0f64..0.7,
            steps in 1usize..20,
        ) {
            let config = ResourceConfig { regrow_rate: rate, ..ResourceConfig::default() };
            let mut state = ResourceState::new(4, 4, config).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            state.reset(&mut rng);
            for _ in 0..steps {
                state.regrow();
                prop_assert!(state.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
        }
    }
}

//! Views of the resource field.

use crate::window::ObsWindow;
use moor_core::encoding::OUT_OF_BOUNDS;
use moor_core::Agent;
use moor_state::ResourceState;

/// Observes resource values within `resource_view` of the observer.
///
/// Cells outside the grid read `-1.0`. Resources are not occluded.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceObserver;

impl ResourceObserver {
    /// The observer's window, `None` if it has no resource view or is not
    /// on the grid.
    pub fn observe(&self, observer: &Agent, resources: &ResourceState) -> Option<ObsWindow<f64>> {
        let range = observer.resource_view()?;
        let origin = observer.position()?;
        Some(ObsWindow::from_fn(range, |offset| {
            resources
                .value(origin + offset)
                .unwrap_or(f64::from(OUT_OF_BOUNDS))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_core::Position;
    use moor_state::ResourceConfig;
    use moor_test_utils::fixtures::resource as fx;
    use moor_test_utils::{seat_at_initial, seated};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture() -> (ResourceState, Vec<Agent>) {
        let config = ResourceConfig::fixed(fx::initial(), fx::REGROW_RATE);
        let mut state = ResourceState::new(fx::SIZE, fx::SIZE, config).unwrap();
        state.reset(&mut ChaCha8Rng::seed_from_u64(0));
        let mut agents = fx::agents();
        seat_at_initial(&mut agents);
        (state, agents)
    }

    fn assert_window(actual: &ObsWindow<f64>, expected: &[Vec<f64>]) {
        let actual = actual.to_nested();
        assert_eq!(actual.len(), expected.len());
        for (r, (a_row, e_row)) in actual.iter().zip(expected).enumerate() {
            assert_eq!(a_row.len(), e_row.len());
            for (c, (a, e)) in a_row.iter().zip(e_row).enumerate() {
                assert!((a - e).abs() < 1e-8, "({r}, {c}): {a} != {e}");
            }
        }
    }

    #[test]
    fn fixture_windows() {
        let (state, agents) = fixture();
        let expected = [
            fx::window_agent0(),
            fx::window_agent1(),
            fx::window_agent2(),
            fx::window_agent3(),
        ];
        for (agent, want) in agents.iter().zip(&expected) {
            let window = ResourceObserver.observe(agent, &state).unwrap();
            assert_window(&window, want);
        }
    }

    #[test]
    fn window_tracks_field_changes() {
        let (mut state, agents) = fixture();
        state.harvest(Position::new(0, 0), 0.5);
        let window = ResourceObserver.observe(&agents[0], &state).unwrap();
        assert!((window[(1, 1)] - (0.84727271 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn agents_without_resource_view_see_nothing() {
        let (state, _) = fixture();
        let blind = seated(Agent::builder("b").build().unwrap(), (0, 0));
        assert!(ResourceObserver.observe(&blind, &state).is_none());
    }
}

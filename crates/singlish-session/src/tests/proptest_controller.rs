//! Property-based tests for the Controller state machine.
//!
//! Generates random edit/poll sequences on a virtual clock and verifies
//! that only the latest buffer is ever rendered.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::make_test_engine;
use crate::{Controller, ControllerState};

const WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
enum Action {
    /// Replace the buffer after `ms` milliseconds.
    Edit(String, u64),
    /// Poll after `ms` milliseconds.
    Poll(u64),
    Flush,
    Cancel,
}

fn arb_buffer() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "", "a", "ap", "api", "api h", "api heta", "mata eeka", "Rs. 2500k", "Zoom eka",
    ])
    .prop_map(String::from)
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => (arb_buffer(), 0u64..150).prop_map(|(b, ms)| Action::Edit(b, ms)),
        5 => (0u64..200).prop_map(Action::Poll),
        1 => Just(Action::Flush),
        1 => Just(Action::Cancel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn only_latest_edit_is_rendered(actions in prop::collection::vec(arb_action(), 1..40)) {
        let engine = make_test_engine();
        let mut c = Controller::with_debounce(engine.clone(), WINDOW);
        let mut now = Instant::now();
        let mut latest: Option<(u64, String)> = None;
        let mut last_rendered = 0u64;

        for action in actions {
            let produced = match action {
                Action::Edit(buffer, ms) => {
                    now += Duration::from_millis(ms);
                    let generation = c.edit(buffer.clone(), now);
                    latest = Some((generation, buffer));
                    None
                }
                Action::Poll(ms) => {
                    now += Duration::from_millis(ms);
                    c.poll(now).cloned()
                }
                Action::Flush => c.flush().cloned(),
                Action::Cancel => {
                    c.cancel();
                    None
                }
            };

            if let Some(rendered) = produced {
                let (generation, buffer) = latest.clone().unwrap();
                prop_assert_eq!(rendered.generation, generation);
                prop_assert_eq!(&rendered.text, &engine.convert(&buffer));
                prop_assert!(rendered.generation > last_rendered);
                last_rendered = rendered.generation;
                prop_assert!(c.is_idle());
            }

            if let ControllerState::Recomputing { generation, .. } = c.state() {
                prop_assert_eq!(Some(*generation), latest.as_ref().map(|(g, _)| *g));
            }
        }
    }
}

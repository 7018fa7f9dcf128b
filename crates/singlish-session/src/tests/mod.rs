mod proptest_controller;

use std::sync::Arc;

use singlish_core::rules::RuleTable;
use singlish_core::Engine;

pub(super) fn make_test_engine() -> Arc<Engine> {
    Arc::new(Engine::new(RuleTable::default_shared()))
}

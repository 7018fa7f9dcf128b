mod rule_files;

use crate::rules::RuleTable;
use crate::Engine;

pub(super) fn test_engine() -> Engine {
    Engine::new(RuleTable::default_shared())
}

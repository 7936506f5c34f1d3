//! 应用状态定义

use rule_engine::RuleStore;

/// 应用共享状态，克隆共享同一规则库
#[derive(Clone, Default)]
pub struct AppState {
    pub store: RuleStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: RuleStore::new(),
        }
    }
}

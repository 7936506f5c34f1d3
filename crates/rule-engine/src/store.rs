//! 内存规则库
//!
//! 只追加、保持插入顺序。合并与求值使用 snapshot 拿到
//! 同一时刻的有序规则树集合。

use crate::ast::Node;
use crate::compiler::compile_rule;
use crate::error::CompileError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// 已入库的规则
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRule {
    pub id: String,
    pub rule_string: String,
    pub node: Node,
    pub required_fields: HashSet<String>,
    pub created_at: DateTime<Utc>,
}

/// 线程安全的规则库，克隆共享同一底层存储
#[derive(Clone, Default)]
pub struct RuleStore {
    rules: Arc<RwLock<Vec<StoredRule>>>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 编译并入库一条规则；编译失败不产生任何写入
    #[instrument(skip(self, rule_string))]
    pub fn add(&self, rule_string: &str) -> Result<StoredRule, CompileError> {
        let node = compile_rule(rule_string)?;
        let stored = StoredRule {
            id: Uuid::new_v4().to_string(),
            rule_string: rule_string.to_string(),
            required_fields: node.fields(),
            node,
            created_at: Utc::now(),
        };
        self.rules.write().push(stored.clone());
        info!(rule_id = %stored.id, "规则已入库");
        Ok(stored)
    }

    /// 按插入顺序返回全部规则
    pub fn list(&self) -> Vec<StoredRule> {
        self.rules.read().clone()
    }

    /// 在单次读锁内取出全部规则树的有序快照
    pub fn snapshot(&self) -> Vec<Node> {
        self.rules.read().iter().map(|r| r.node.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

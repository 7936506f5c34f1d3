//! 规则合并
//!
//! 多条已编译规则按给定顺序左折叠为一棵 AND 树：
//! `((r1 AND r2) AND r3) ...`。输入不被消费，重复合并产出结构相同的树。

use crate::ast::Node;
use crate::error::CombineError;
use crate::operators::BoolOp;

/// 将多棵规则树合并为单棵 AND 树
pub fn combine_rules(rules: &[Node]) -> Result<Node, CombineError> {
    let mut iter = rules.iter();
    let first = iter.next().ok_or(CombineError::Empty)?.clone();
    Ok(iter.fold(first, |acc, rule| Node::Operator {
        op: BoolOp::And,
        left: Box::new(acc),
        right: Box::new(rule.clone()),
    }))
}

//! 资格规则引擎
//!
//! 将规则文本编译为 AST、合并多条规则并在数据上下文上求值，支持：
//! - 封闭文法的规则编译（全部校验在编译期完成）
//! - 多规则按插入顺序 AND 合并
//! - 经由封闭比较操作符表的求值（绝不执行规则文本）

pub mod ast;
pub mod combiner;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod operators;
pub mod store;

pub use ast::{Comparison, DataContext, Literal, Node};
pub use combiner::combine_rules;
pub use compiler::compile_rule;
pub use error::{CombineError, CompileError, EvalError};
pub use evaluator::evaluate_rule;
pub use operators::{BoolOp, CompareOp};
pub use store::{RuleStore, StoredRule};

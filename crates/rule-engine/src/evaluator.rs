//! 规则求值器
//!
//! 对编译产出的 AST 做后序遍历求值。比较分发只经由封闭的
//! 操作符表，绝不执行规则文本。字段缺失和类型不匹配是硬错误，
//! 立即中止整棵树的求值，而不是静默按 false 处理。

use crate::ast::{Comparison, DataContext, Literal, Node};
use crate::error::EvalError;
use crate::operators::{BoolOp, CompareOp};
use serde_json::Value;

/// 在数据上下文上求值一棵规则树
pub fn evaluate_rule(node: &Node, data: &DataContext) -> Result<bool, EvalError> {
    match node {
        Node::Operand(cmp) => evaluate_comparison(cmp, data),
        Node::Operator { op, left, right } => {
            // 契约：两侧子树总是都会被评估，AND/OR 不短路，
            // 任一侧的求值错误都必须浮出
            let lhs = evaluate_rule(left, data)?;
            let rhs = evaluate_rule(right, data)?;
            Ok(match op {
                BoolOp::And => lhs && rhs,
                BoolOp::Or => lhs || rhs,
            })
        }
    }
}

fn evaluate_comparison(cmp: &Comparison, data: &DataContext) -> Result<bool, EvalError> {
    let field_value = data
        .get(&cmp.field)
        .ok_or_else(|| EvalError::UndefinedField(cmp.field.clone()))?;

    match &cmp.value {
        Literal::Number(expected) => {
            let actual = as_number(field_value)
                .ok_or_else(|| type_mismatch(&cmp.field, "number", field_value))?;
            Ok(compare_f64(cmp.op, actual, *expected))
        }
        Literal::Str(expected) => {
            let actual = field_value
                .as_str()
                .ok_or_else(|| type_mismatch(&cmp.field, "string", field_value))?;
            Ok(compare_str(cmp.op, actual, expected))
        }
    }
}

/// 仅 JSON 数字视为数字，不做字符串到数字的隐式转换
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn compare_f64(op: CompareOp, actual: f64, expected: f64) -> bool {
    match op {
        CompareOp::Lt => actual < expected,
        CompareOp::Gt => actual > expected,
        CompareOp::Eq => (actual - expected).abs() < f64::EPSILON,
        CompareOp::Neq => (actual - expected).abs() >= f64::EPSILON,
        CompareOp::Lte => actual <= expected,
        CompareOp::Gte => actual >= expected,
    }
}

fn compare_str(op: CompareOp, actual: &str, expected: &str) -> bool {
    match op {
        CompareOp::Lt => actual < expected,
        CompareOp::Gt => actual > expected,
        CompareOp::Eq => actual == expected,
        CompareOp::Neq => actual != expected,
        CompareOp::Lte => actual <= expected,
        CompareOp::Gte => actual >= expected,
    }
}

fn type_mismatch(field: &str, expected: &str, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: type_name(actual).to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

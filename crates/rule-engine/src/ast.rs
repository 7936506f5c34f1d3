//! 规则 AST 数据模型
//!
//! AST 节点只能由编译器产出，对外只暴露序列化（用于 API 回显），
//! 不提供反序列化入口，保证所有树都经过编译期校验。

use crate::operators::{BoolOp, CompareOp};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// 比较右侧的字面量
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => {
                // 整数值不带小数位回显
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Literal::Str(s) => write!(f, "'{}'", s),
        }
    }
}

/// 单个比较条件，形如 `age > 30`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    pub value: Literal,
}

impl Comparison {
    pub fn new(field: impl Into<String>, op: CompareOp, value: Literal) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// 规则 AST 节点
///
/// 叶子为比较条件，内部节点为 AND/OR 二元组合。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Operand(Comparison),
    Operator {
        op: BoolOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn and(left: Node, right: Node) -> Self {
        Node::Operator {
            op: BoolOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Operator {
            op: BoolOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// 收集树中引用的全部字段名
    pub fn fields(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut HashSet<String>) {
        match self {
            Node::Operand(cmp) => {
                out.insert(cmp.field.clone());
            }
            Node::Operator { left, right, .. } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operand(cmp) => write!(f, "{}", cmp),
            Node::Operator { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
        }
    }
}

/// 求值时的数据上下文，字段名到 JSON 值的映射
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    data: Map<String, Value>,
}

impl DataContext {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// 从 JSON 值构造；仅接受对象
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { data: map }),
            _ => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

//! 规则操作符定义

use serde::Serialize;
use std::fmt;

/// 比较操作符
///
/// 封闭集合：求值只经由该表分发，规则文本中出现任何其他 token 都会在编译期被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
    Neq,
    Lte,
    Gte,
}

impl CompareOp {
    /// 从规则文本中的符号 token 解析；不在表内的 token 返回 None
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Neq),
            "<=" => Some(Self::Lte),
            ">=" => Some(Self::Gte),
            _ => None,
        }
    }

    /// 操作符在规则文本中的符号形式
    pub fn token(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lte => "<=",
            Self::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    /// 从规则文本中的保留字解析（大小写敏感）
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

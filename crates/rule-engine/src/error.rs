//! 规则引擎错误定义

use thiserror::Error;

/// 规则编译错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("规则格式错误: {0}")]
    MalformedRule(String),

    #[error("不支持的比较操作符: '{0}'")]
    UnknownOperator(String),

    #[error("无效的字面量: '{0}'")]
    InvalidLiteral(String),
}

/// 规则合并错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    #[error("没有可合并的规则")]
    Empty,
}

/// 规则求值错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("字段不存在: {0}")]
    UndefinedField(String),

    #[error("类型不匹配: 字段 '{field}' 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

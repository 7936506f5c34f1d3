//! API 错误类型定义
//!
//! 将引擎错误映射为带错误码的统一 JSON 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rule_engine::{CombineError, CompileError, EvalError};
use serde_json::json;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Combine(#[from] CombineError),

    #[error(transparent)]
    Evaluate(#[from] EvalError),

    #[error("参数验证失败: {0}")]
    Validation(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Compile(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Combine(CombineError::Empty) => StatusCode::CONFLICT,
            Self::Evaluate(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// 返回业务错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Compile(CompileError::MalformedRule(_)) => "MALFORMED_RULE",
            Self::Compile(CompileError::UnknownOperator(_)) => "UNKNOWN_OPERATOR",
            Self::Compile(CompileError::InvalidLiteral(_)) => "INVALID_LITERAL",
            Self::Combine(CombineError::Empty) => "NO_RULES_TO_COMBINE",
            Self::Evaluate(EvalError::UndefinedField(_)) => "UNDEFINED_FIELD",
            Self::Evaluate(EvalError::TypeMismatch { .. }) => "TYPE_MISMATCH",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": self.to_string(),
            "data": null,
        });
        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use rule_engine::StoredRule;
use serde::Serialize;
use serde_json::Value;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }

    /// 创建错误响应
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// 规则响应 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDto {
    pub id: String,
    pub rule_string: String,
    pub ast: Value,
    pub display: String,
    pub required_fields: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StoredRule> for RuleDto {
    fn from(rule: StoredRule) -> Self {
        let ast = serde_json::to_value(&rule.node).unwrap_or(Value::Null);
        let display = rule.node.to_string();
        let mut required_fields: Vec<String> = rule.required_fields.into_iter().collect();
        required_fields.sort();

        Self {
            id: rule.id,
            rule_string: rule.rule_string,
            ast,
            display,
            required_fields,
            created_at: rule.created_at,
        }
    }
}

/// 合并结果响应 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRuleDto {
    pub rule_count: usize,
    pub ast: Value,
    pub display: String,
}

/// 求值结果响应 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDto {
    pub eligible: bool,
    pub rule_count: usize,
    pub evaluation_time_ms: u64,
}

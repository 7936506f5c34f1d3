//! 规则 API 处理器
//!
//! 实现规则的创建、查询、合并与求值。

use std::time::Instant;

use axum::{extract::State, Json};
use rule_engine::{combine_rules, evaluate_rule, DataContext};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{ApiResponse, CombinedRuleDto, CreateRuleRequest, EvaluateRequest, EvaluationDto, RuleDto},
    error::ApiError,
    state::AppState,
};

/// 创建规则
///
/// 编译规则文本并入库，返回规则的 AST 与元信息。
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<Json<ApiResponse<RuleDto>>, ApiError> {
    req.validate()?;

    let stored = state.store.add(&req.rule_string)?;
    info!(rule_id = %stored.id, "Rule created");

    Ok(Json(ApiResponse::success(stored.into())))
}

/// 按插入顺序列出全部规则
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RuleDto>>>, ApiError> {
    let rules: Vec<RuleDto> = state.store.list().into_iter().map(RuleDto::from).collect();
    Ok(Json(ApiResponse::success(rules)))
}

/// 合并全部已入库规则为单棵 AND 树
pub async fn combine(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CombinedRuleDto>>, ApiError> {
    let nodes = state.store.snapshot();
    let combined = combine_rules(&nodes)?;

    let dto = CombinedRuleDto {
        rule_count: nodes.len(),
        ast: serde_json::to_value(&combined).unwrap_or(serde_json::Value::Null),
        display: combined.to_string(),
    };
    Ok(Json(ApiResponse::success(dto)))
}

/// 在给定数据上下文上求值合并后的规则
pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<ApiResponse<EvaluationDto>>, ApiError> {
    let data = DataContext::from_value(req.data)
        .ok_or_else(|| ApiError::Validation("data 必须是 JSON 对象".to_string()))?;

    let nodes = state.store.snapshot();
    let combined = combine_rules(&nodes)?;

    let start = Instant::now();
    let eligible = evaluate_rule(&combined, &data)?;
    let elapsed = start.elapsed();

    info!(
        eligible,
        rule_count = nodes.len(),
        latency_ms = elapsed.as_millis() as u64,
        "Evaluation completed"
    );

    Ok(Json(ApiResponse::success(EvaluationDto {
        eligible,
        rule_count: nodes.len(),
        evaluation_time_ms: elapsed.as_millis() as u64,
    })))
}

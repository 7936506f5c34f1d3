//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, state::AppState};

/// 构建规则相关的路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", post(handlers::rule::create_rule))
        .route("/rules", get(handlers::rule::list_rules))
        .route("/rules/combine", post(handlers::rule::combine))
        .route("/rules/evaluate", post(handlers::rule::evaluate))
}

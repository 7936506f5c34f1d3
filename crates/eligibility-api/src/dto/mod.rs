//! 请求与响应 DTO 定义

pub mod request;
pub mod response;

pub use request::{CreateRuleRequest, EvaluateRequest};
pub use response::{ApiResponse, CombinedRuleDto, EvaluationDto, RuleDto};

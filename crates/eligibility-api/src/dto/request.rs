//! 请求 DTO 定义

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// 创建规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 1024, message = "规则文本长度必须在 1 到 1024 之间"))]
    pub rule_string: String,
}

/// 求值请求，data 为字段名到值的 JSON 对象
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rule_request_validation() {
        let req = CreateRuleRequest {
            rule_string: "age > 30".to_string(),
        };
        assert!(req.validate().is_ok());

        let empty = CreateRuleRequest {
            rule_string: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateRuleRequest {
            rule_string: "x".repeat(2000),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_create_rule_request_deserialization() {
        let req: CreateRuleRequest =
            serde_json::from_str(r#"{"ruleString": "age > 30"}"#).unwrap();
        assert_eq!(req.rule_string, "age > 30");
    }
}

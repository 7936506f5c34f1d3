//! 规则引擎集成测试
//!
//! 测试完整的规则编译、入库、合并、求值工作流。

use rule_engine::{
    combine_rules, compile_rule, evaluate_rule, CombineError, CompileError, DataContext,
    EvalError, RuleStore,
};

/// 创建测试上下文：一名符合资格的候选人
fn eligible_candidate() -> DataContext {
    DataContext::from_json(
        r#"
        {
            "age": 35,
            "department": "Sales",
            "salary": 60000,
            "experience": 7,
            "location": "Shanghai"
        }
        "#,
    )
    .unwrap()
}

/// 创建测试上下文：一名不符合资格的候选人
fn ineligible_candidate() -> DataContext {
    DataContext::from_json(
        r#"
        {
            "age": 22,
            "department": "Marketing",
            "salary": 30000,
            "experience": 1,
            "location": "Beijing"
        }
        "#,
    )
    .unwrap()
}

// ==================== 完整工作流测试 ====================

#[test]
fn test_full_workflow_with_store() {
    // 1. 创建规则库并入库多条规则
    let store = RuleStore::new();
    store.add("age > 30").unwrap();
    store.add("department == 'Sales'").unwrap();
    store.add("salary >= 50000 OR experience > 5").unwrap();
    assert_eq!(store.len(), 3);

    // 2. 合并为单棵 AND 树
    let nodes = store.snapshot();
    let combined = combine_rules(&nodes).unwrap();

    // 3. 对两个上下文求值
    assert_eq!(evaluate_rule(&combined, &eligible_candidate()), Ok(true));
    assert_eq!(evaluate_rule(&combined, &ineligible_candidate()), Ok(false));
}

#[test]
fn test_combined_tree_requires_all_rules_to_pass() {
    let rules = vec![
        compile_rule("age > 30").unwrap(),
        compile_rule("department == 'Engineering'").unwrap(),
    ];
    let combined = combine_rules(&rules).unwrap();

    // 候选人满足年龄但不在 Engineering 部门
    assert_eq!(evaluate_rule(&combined, &eligible_candidate()), Ok(false));
}

#[test]
fn test_combine_with_no_rules_is_rejected() {
    let store = RuleStore::new();
    assert_eq!(combine_rules(&store.snapshot()), Err(CombineError::Empty));
}

#[test]
fn test_compile_errors_keep_store_clean() {
    let store = RuleStore::new();
    store.add("age > 30").unwrap();

    assert_eq!(
        store.add("age >>> 30"),
        Err(CompileError::UnknownOperator(">>>".to_string()))
    );
    assert!(matches!(
        store.add("age > 30 AND"),
        Err(CompileError::MalformedRule(_))
    ));

    // 失败的规则不会污染规则库
    assert_eq!(store.len(), 1);
}

#[test]
fn test_missing_field_aborts_combined_evaluation() {
    let rules = vec![
        compile_rule("age > 30").unwrap(),
        compile_rule("security_clearance == 'top'").unwrap(),
    ];
    let combined = combine_rules(&rules).unwrap();

    assert_eq!(
        evaluate_rule(&combined, &eligible_candidate()),
        Err(EvalError::UndefinedField("security_clearance".to_string()))
    );
}

#[test]
fn test_compiled_tree_survives_serialization() {
    let node = compile_rule("age > 30 AND department == 'Sales'").unwrap();
    let value = serde_json::to_value(&node).unwrap();

    assert_eq!(value["type"], "operator");
    assert_eq!(value["op"], "AND");
    assert_eq!(value["left"]["field"], "age");
    assert_eq!(value["right"]["field"], "department");
}

#[test]
fn test_display_round_trips_through_compiler() {
    // Display 产出的文本去掉括号后仍是合法规则
    let node = compile_rule("salary >= 50000 OR experience > 5").unwrap();
    let rendered = node.to_string().replace(['(', ')'], "");
    let reparsed = compile_rule(&rendered).unwrap();
    assert_eq!(node, reparsed);
}

#[test]
fn test_large_combined_rule() {
    let rules: Vec<_> = (0..50)
        .map(|i| compile_rule(&format!("f{} >= {}", i, i)).unwrap())
        .collect();
    let combined = combine_rules(&rules).unwrap();

    let mut map = serde_json::Map::new();
    for i in 0..50 {
        map.insert(format!("f{}", i), serde_json::json!(i + 1));
    }
    let data = DataContext::new(map);
    assert_eq!(evaluate_rule(&combined, &data), Ok(true));
}

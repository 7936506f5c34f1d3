//! 规则编译器
//!
//! 文法（扁平，无括号分组）：
//!
//! ```text
//! rule       := comparison (BOOLOP comparison)*
//! comparison := FIELD COMPARE_OP LITERAL
//! BOOLOP     := "AND" | "OR"
//! ```
//!
//! 同级 AND/OR 按出现顺序左结合折叠。所有校验在编译期完成，
//! 编译通过的树求值时不会再出现文法类错误。

use crate::ast::{Comparison, Literal, Node};
use crate::error::CompileError;
use crate::operators::{BoolOp, CompareOp};

/// 词法 token，带引号的字符串作为原子 token 保留
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
}

impl Token {
    fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Quoted(s) => s,
        }
    }
}

/// 将规则文本编译为 AST
pub fn compile_rule(rule_string: &str) -> Result<Node, CompileError> {
    let tokens = tokenize(rule_string)?;
    parse(&tokens)
}

fn tokenize(input: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '\'' || c == '"' {
            let quote = c;
            chars.next();
            let mut content = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == quote {
                    closed = true;
                    break;
                }
                content.push(ch);
            }
            if !closed {
                return Err(CompileError::MalformedRule(
                    "未闭合的字符串字面量".to_string(),
                ));
            }
            tokens.push(Token::Quoted(content));
        } else {
            let mut word = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() || ch == '\'' || ch == '"' {
                    break;
                }
                word.push(ch);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

fn parse(tokens: &[Token]) -> Result<Node, CompileError> {
    if tokens.len() < 3 {
        return Err(CompileError::MalformedRule(
            "规则至少需要一个完整的比较条件".to_string(),
        ));
    }

    let mut node = parse_comparison(&tokens[0..3])?;
    let mut rest = &tokens[3..];

    while !rest.is_empty() {
        if rest.len() < 4 {
            return Err(CompileError::MalformedRule(format!(
                "'{}' 之后缺少完整的比较条件",
                rest[0].text()
            )));
        }
        let bool_op = match &rest[0] {
            Token::Word(w) => BoolOp::from_token(w).ok_or_else(|| {
                CompileError::MalformedRule(format!("期望 AND/OR, 实际为 '{}'", w))
            })?,
            Token::Quoted(q) => {
                return Err(CompileError::MalformedRule(format!(
                    "期望 AND/OR, 实际为 '{}'",
                    q
                )));
            }
        };
        let right = parse_comparison(&rest[1..4])?;
        node = Node::Operator {
            op: bool_op,
            left: Box::new(node),
            right: Box::new(right),
        };
        rest = &rest[4..];
    }

    Ok(node)
}

fn parse_comparison(tokens: &[Token]) -> Result<Node, CompileError> {
    let field = parse_field(&tokens[0])?;
    let op = parse_compare_op(&tokens[1])?;
    let value = parse_literal(&tokens[2])?;
    Ok(Node::Operand(Comparison::new(field, op, value)))
}

fn parse_field(token: &Token) -> Result<String, CompileError> {
    match token {
        Token::Word(w) => {
            if BoolOp::from_token(w).is_some() {
                return Err(CompileError::MalformedRule(format!(
                    "'{}' 是保留字, 不能作为字段名",
                    w
                )));
            }
            if !is_identifier(w) {
                return Err(CompileError::MalformedRule(format!(
                    "无效的字段名: '{}'",
                    w
                )));
            }
            Ok(w.clone())
        }
        Token::Quoted(q) => Err(CompileError::MalformedRule(format!(
            "字段名不能是字符串字面量: '{}'",
            q
        ))),
    }
}

fn parse_compare_op(token: &Token) -> Result<CompareOp, CompileError> {
    match token {
        Token::Word(w) => {
            CompareOp::from_token(w).ok_or_else(|| CompileError::UnknownOperator(w.clone()))
        }
        Token::Quoted(q) => Err(CompileError::UnknownOperator(q.clone())),
    }
}

fn parse_literal(token: &Token) -> Result<Literal, CompileError> {
    match token {
        Token::Quoted(q) => Ok(Literal::Str(q.clone())),
        Token::Word(w) => {
            if let Ok(n) = w.parse::<f64>() {
                if n.is_finite() {
                    return Ok(Literal::Number(n));
                }
                return Err(CompileError::InvalidLiteral(w.clone()));
            }
            if BoolOp::from_token(w).is_some() {
                return Err(CompileError::InvalidLiteral(w.clone()));
            }
            // 形如标识符的裸单词按单词字符串接受
            if is_identifier(w) {
                return Ok(Literal::Str(w.clone()));
            }
            Err(CompileError::InvalidLiteral(w.clone()))
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_single_comparison() {
        let node = compile_rule("age > 30").unwrap();
        match node {
            Node::Operand(cmp) => {
                assert_eq!(cmp.field, "age");
                assert_eq!(cmp.op, CompareOp::Gt);
                assert_eq!(cmp.value, Literal::Number(30.0));
            }
            _ => panic!("expected operand"),
        }
    }

    #[test]
    fn test_compile_two_comparisons_tree_shape() {
        let node = compile_rule("age > 30 AND department == 'Sales'").unwrap();
        match node {
            Node::Operator { op, left, right } => {
                assert_eq!(op, BoolOp::And);
                assert!(matches!(*left, Node::Operand(_)));
                match *right {
                    Node::Operand(cmp) => {
                        assert_eq!(cmp.field, "department");
                        assert_eq!(cmp.value, Literal::Str("Sales".to_string()));
                    }
                    _ => panic!("expected operand"),
                }
            }
            _ => panic!("expected operator"),
        }
    }

    #[test]
    fn test_compile_left_associative_fold() {
        // a == 1 AND b == 2 OR c == 3 解析为 ((a AND b) OR c)
        let node = compile_rule("a == 1 AND b == 2 OR c == 3").unwrap();
        assert_eq!(node.to_string(), "((a == 1 AND b == 2) OR c == 3)");
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            compile_rule("age >> 30"),
            Err(CompileError::UnknownOperator(">>".to_string()))
        );
        assert_eq!(
            compile_rule("age = 30"),
            Err(CompileError::UnknownOperator("=".to_string()))
        );
    }

    #[test]
    fn test_malformed_too_few_tokens() {
        assert!(matches!(
            compile_rule(""),
            Err(CompileError::MalformedRule(_))
        ));
        assert!(matches!(
            compile_rule("age >"),
            Err(CompileError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_malformed_trailing_bool_op() {
        assert!(matches!(
            compile_rule("age > 30 AND"),
            Err(CompileError::MalformedRule(_))
        ));
        assert!(matches!(
            compile_rule("age > 30 AND department =="),
            Err(CompileError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_malformed_missing_bool_op() {
        assert!(matches!(
            compile_rule("age > 30 department == 'Sales'"),
            Err(CompileError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_quoted_literal_with_spaces() {
        let node = compile_rule("department == 'Human Resources'").unwrap();
        match node {
            Node::Operand(cmp) => {
                assert_eq!(cmp.value, Literal::Str("Human Resources".to_string()));
            }
            _ => panic!("expected operand"),
        }
    }

    #[test]
    fn test_double_quoted_literal() {
        let node = compile_rule(r#"department == "Sales""#).unwrap();
        match node {
            Node::Operand(cmp) => {
                assert_eq!(cmp.value, Literal::Str("Sales".to_string()));
            }
            _ => panic!("expected operand"),
        }
    }

    #[test]
    fn test_bare_word_literal_accepted_as_string() {
        let node = compile_rule("department == Sales").unwrap();
        match node {
            Node::Operand(cmp) => {
                assert_eq!(cmp.value, Literal::Str("Sales".to_string()));
            }
            _ => panic!("expected operand"),
        }
    }

    #[test]
    fn test_invalid_literal() {
        assert_eq!(
            compile_rule("age > 3x0"),
            Err(CompileError::InvalidLiteral("3x0".to_string()))
        );
        assert_eq!(
            compile_rule("age > AND"),
            Err(CompileError::InvalidLiteral("AND".to_string()))
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            compile_rule("department == 'Sales"),
            Err(CompileError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_reserved_word_as_field_rejected() {
        assert!(matches!(
            compile_rule("AND > 30"),
            Err(CompileError::MalformedRule(_))
        ));
    }

    #[test]
    fn test_negative_and_fractional_numbers() {
        let node = compile_rule("balance >= -12.5").unwrap();
        match node {
            Node::Operand(cmp) => {
                assert_eq!(cmp.value, Literal::Number(-12.5));
            }
            _ => panic!("expected operand"),
        }
    }
}

//! Field-path expressions.
//!
//! A path addresses a location in a record's field tree: `/name` selects a
//! map key, `[index]` selects a list position, and steps compose left to
//! right from an implicit root (`/a/b[0]/c`). The empty expression addresses
//! the root itself. Parsing is pure and happens once; the resulting elements
//! are immutable and reusable across any number of traversals.

use crate::error::PathParseError;

/// One parsed step of a field-path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    /// The record's root value.
    Root,
    /// A key lookup in a map or ordered map.
    Map(String),
    /// A zero-based position in a list.
    List(usize),
}

/// Compiles a textual field-path expression into path elements.
///
/// The returned sequence always begins with [`PathElement::Root`]; the empty
/// expression yields only that. Rejects unmatched brackets, non-numeric or
/// empty list indices, empty key names, and any character outside a step.
pub fn parse_field_path(expr: &str) -> Result<Vec<PathElement>, PathParseError> {
    let mut elements = vec![PathElement::Root];
    let mut rest = expr;
    let mut pos = 0;

    while let Some(first) = rest.chars().next() {
        match first {
            '/' => {
                let body = &rest[1..];
                let end = body.find(['/', '[']).unwrap_or(body.len());
                let name = &body[..end];
                if name.is_empty() {
                    return Err(PathParseError::EmptyName {
                        expr: expr.to_string(),
                        pos,
                    });
                }
                elements.push(PathElement::Map(name.to_string()));
                pos += 1 + end;
                rest = &body[end..];
            }
            '[' => {
                let body = &rest[1..];
                let Some(close) = body.find(']') else {
                    return Err(PathParseError::UnmatchedBracket {
                        expr: expr.to_string(),
                        pos,
                    });
                };
                let token = &body[..close];
                if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PathParseError::InvalidIndex {
                        expr: expr.to_string(),
                        token: token.to_string(),
                    });
                }
                let index = token
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex {
                        expr: expr.to_string(),
                        token: token.to_string(),
                    })?;
                elements.push(PathElement::List(index));
                pos += close + 2;
                rest = &body[close + 1..];
            }
            found => {
                return Err(PathParseError::UnexpectedCharacter {
                    expr: expr.to_string(),
                    pos,
                    found,
                });
            }
        }
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_expression_is_root() {
        assert_eq!(parse_field_path("").expect("parse"), [PathElement::Root]);
    }

    #[test]
    fn composed_steps() {
        let elements = parse_field_path("/a/b[0]/c").expect("parse");
        assert_eq!(
            elements,
            [
                PathElement::Root,
                PathElement::Map("a".to_string()),
                PathElement::Map("b".to_string()),
                PathElement::List(0),
                PathElement::Map("c".to_string()),
            ]
        );
    }

    #[test]
    fn index_step_can_lead() {
        let elements = parse_field_path("[3]/x").expect("parse");
        assert_eq!(
            elements,
            [
                PathElement::Root,
                PathElement::List(3),
                PathElement::Map("x".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_unmatched_bracket() {
        let err = parse_field_path("/list[2").unwrap_err();
        assert!(matches!(err, PathParseError::UnmatchedBracket { pos: 5, .. }));
    }

    #[test]
    fn rejects_non_numeric_index() {
        let err = parse_field_path("/list[two]").unwrap_err();
        assert!(matches!(
            err,
            PathParseError::InvalidIndex { ref token, .. } if token == "two"
        ));
        let err = parse_field_path("/list[-1]").unwrap_err();
        assert!(matches!(err, PathParseError::InvalidIndex { .. }));
        let err = parse_field_path("/list[]").unwrap_err();
        assert!(matches!(err, PathParseError::InvalidIndex { .. }));
    }

    #[test]
    fn rejects_empty_name() {
        let err = parse_field_path("/a//b").unwrap_err();
        assert!(matches!(err, PathParseError::EmptyName { pos: 2, .. }));
        let err = parse_field_path("/").unwrap_err();
        assert!(matches!(err, PathParseError::EmptyName { pos: 0, .. }));
    }

    #[test]
    fn rejects_stray_characters() {
        let err = parse_field_path("a").unwrap_err();
        assert!(matches!(
            err,
            PathParseError::UnexpectedCharacter { found: 'a', .. }
        ));
        let err = parse_field_path("]").unwrap_err();
        assert!(matches!(
            err,
            PathParseError::UnexpectedCharacter { found: ']', .. }
        ));
    }

    #[test]
    fn parsing_is_pure() {
        let expr = "/devices[12]/status/code";
        assert_eq!(
            parse_field_path(expr).expect("first parse"),
            parse_field_path(expr).expect("second parse")
        );
    }

    fn step_strategy() -> impl Strategy<Value = PathElement> {
        prop_oneof![
            "[A-Za-z_][A-Za-z0-9_]{0,7}".prop_map(PathElement::Map),
            (0usize..512).prop_map(PathElement::List),
        ]
    }

    proptest! {
        #[test]
        fn round_trips_generated_paths(steps in prop::collection::vec(step_strategy(), 0..6)) {
            let mut expr = String::new();
            for step in &steps {
                match step {
                    PathElement::Map(name) => {
                        expr.push('/');
                        expr.push_str(name);
                    }
                    PathElement::List(index) => {
                        expr.push_str(&format!("[{index}]"));
                    }
                    PathElement::Root => {}
                }
            }

            let mut expected = vec![PathElement::Root];
            expected.extend(steps);
            prop_assert_eq!(parse_field_path(&expr).expect("parse generated path"), expected);
        }
    }
}

//! Construction-time errors abort the run and name the offending item

mod common;

use common::*;
use symcheck::features::frontend::FrontendError;
use symcheck::features::symbolic::{BitWidth, IntType};
use symcheck::{verify_program, verify_source, EngineError, Expr, Program, SourceLocation, ValidatedConfig};

#[test]
fn test_width_mismatch_names_operation_and_location() {
    let program = Program::new("mixed")
        .declare("x", INT8)
        .declare("w", INT32)
        .check((Expr::var("x") + Expr::var("w")).gt(Expr::int(0)));

    let err = verify_program(&program, &ValidatedConfig::default()).unwrap_err();
    match &err {
        EngineError::WidthMismatch {
            op,
            lhs_type,
            rhs_type,
            location,
            ..
        } => {
            assert_eq!(op, "+");
            assert_eq!(lhs_type, "int8_t");
            assert_eq!(rhs_type, "int32_t");
            assert_eq!(location.as_ref(), Some(&SourceLocation::synthetic("mixed", 2)));
        }
        other => panic!("expected width mismatch, got {}", other),
    }
    assert!(err.to_string().contains("`x + w`"));
}

#[test]
fn test_width_mismatch_from_fixture() {
    let source = r#"
int main() {
  int8_t x = crucible_int8_t("x");
  int16_t y = crucible_int16_t("y");
  check(x < y);
}"#;
    let err = verify_source("mismatch.c", source, &ValidatedConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::WidthMismatch { .. }));
    assert_eq!(err.location(), Some(&SourceLocation::new("mismatch.c", 5, 3)));
}

#[test]
fn test_undeclared_symbol_in_assumption() {
    let program = Program::new("p")
        .declare("x", INT8)
        .assume(Expr::var("y").gt(Expr::int(0)))
        .check(Expr::var("x").gt(Expr::int(0)));

    let err = verify_program(&program, &ValidatedConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::UndeclaredSymbol { ref name, .. } if name == "y"));
}

#[test]
fn test_symbol_used_before_declaration() {
    let program = Program::new("p")
        .check(Expr::var("x").gt(Expr::int(0)))
        .declare("x", INT8);

    assert!(matches!(
        verify_program(&program, &ValidatedConfig::default()),
        Err(EngineError::UndeclaredSymbol { .. })
    ));
}

#[test]
fn test_literal_out_of_range() {
    let program = Program::new("p")
        .declare("x", IntType::unsigned(BitWidth::W8))
        .check(Expr::var("x").lt(Expr::int(256)));

    let err = verify_program(&program, &ValidatedConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::LiteralOutOfRange { value: 256, .. }));
    assert!(err.to_string().contains("uint8_t"));
}

#[test]
fn test_sort_mismatch() {
    let program = Program::new("p")
        .declare("x", INT8)
        .check(Expr::var("x").gt(Expr::int(0)) + Expr::int(1));

    assert!(matches!(
        verify_program(&program, &ValidatedConfig::default()),
        Err(EngineError::SortMismatch { .. })
    ));
}

#[test]
fn test_unsupported_fixture_construct() {
    let source = "int main() {\n  int8_t x = crucible_int8_t(\"x\");\n  x = 3;\n}";
    let err = verify_source("assign.c", source, &ValidatedConfig::default()).unwrap_err();
    match err {
        EngineError::Frontend(FrontendError::Unsupported { location, .. }) => {
            assert_eq!(location.line, 3);
        }
        other => panic!("expected unsupported construct, got {}", other),
    }
}

#[test]
fn test_program_json_with_bad_width() {
    let json = r#"{"name": "p", "items": [{"declare": {"name": "x", "width": 7, "signed": true}}]}"#;
    assert!(matches!(
        Program::from_json(json),
        Err(EngineError::Serialization(_))
    ));
}

#[test]
fn test_widening_local_is_rejected_not_misverified() {
    let source = r#"
int main() {
  int8_t x = crucible_int8_t("x");
  int32_t w = x;
  assuming(x > 0);
  check(w + 1 > 0);
}"#;
    let err = verify_source("w.c", source, &ValidatedConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Frontend(FrontendError::Unsupported { ref construct, .. })
            if construct == "int32_t initialised from int8_t `x`"
    ));
}

#[test]
fn test_constant_beyond_signed_range_from_fixture() {
    let source = "int main() {\n  int8_t x = crucible_int8_t(\"x\");\n  check(x < 200);\n}";
    let err = verify_source("l.c", source, &ValidatedConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::LiteralOutOfRange { value: 200, .. }));
    assert_eq!(err.location(), Some(&SourceLocation::new("l.c", 3, 3)));
}

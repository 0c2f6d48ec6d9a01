//! C fixture front-end - tree-sitter C → Program
//!
//! Accepts the Crucible fixture subset found in `main`:
//! - `T x = crucible_T("x");` declares a symbolic input
//! - `assuming(e);` / `crucible_assume(e);` adds an assumption
//! - `check(e);` / `crucible_assert(e, ...);` adds a check
//! - `T w = e;` binds a local that later expressions use in place of `w`;
//!   `e` must already have type `T` (there are no implicit conversions)
//!
//! `#include`, comments and `return` are skipped. Everything else is
//! reported as unsupported, with its position.

use crate::features::execution::{Expr, Item, Program};
use crate::features::frontend::domain::{FixtureFrontend, FrontendError};
use crate::features::symbolic::{BinOp, IntType, OpClass, Signedness, UnaryOp};
use crate::shared::models::SourceLocation;
use std::collections::HashMap;
use tree_sitter::{Node, Parser, Tree};

pub struct CFixtureParser {
    parser: Parser,
}

impl CFixtureParser {
    pub fn new() -> Result<Self, FrontendError> {
        let mut parser = Parser::new();
        let language = tree_sitter_c::language();
        parser
            .set_language(&language)
            .map_err(|e| FrontendError::Grammar(e.to_string()))?;

        Ok(Self { parser })
    }

    fn parse_tree(&mut self, file_name: &str, source: &str) -> Result<Tree, FrontendError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| FrontendError::Syntax {
                message: "parser produced no tree".to_string(),
                location: SourceLocation::new(file_name, 1, 1),
            })
    }
}

impl FixtureFrontend for CFixtureParser {
    fn parse(&mut self, file_name: &str, source: &str) -> Result<Program, FrontendError> {
        let tree = self.parse_tree(file_name, source)?;
        let program = FixtureVisitor::new(file_name, source).visit(&tree)?;
        tracing::debug!(
            file = file_name,
            items = program.items.len(),
            checks = program.check_count(),
            "fixture parsed"
        );
        Ok(program)
    }

    fn language(&self) -> &str {
        "c"
    }
}

/// Traversal state for one file
struct FixtureVisitor<'s> {
    file: &'s str,
    source: &'s str,
    /// C variable → expression it stands for
    bindings: HashMap<String, Expr>,
    /// Symbolic input name → declared type
    inputs: HashMap<String, IntType>,
    program: Program,
}

impl<'s> FixtureVisitor<'s> {
    fn new(file: &'s str, source: &'s str) -> Self {
        Self {
            file,
            source,
            bindings: HashMap::new(),
            inputs: HashMap::new(),
            program: Program::new(file),
        }
    }

    fn visit(mut self, tree: &Tree) -> Result<Program, FrontendError> {
        let root = tree.root_node();
        if root.has_error() {
            return Err(self.syntax_error(first_error(root)));
        }

        let mut body = None;
        for child in root.named_children(&mut root.walk()) {
            match child.kind() {
                "preproc_include" | "comment" => {}
                "function_definition" if self.function_name(child) == Some("main") => {
                    body = child.child_by_field_name("body");
                }
                "function_definition" => {
                    return Err(self.unsupported("function other than main", child))
                }
                other => return Err(self.unsupported(other, child)),
            }
        }

        let body = body.ok_or_else(|| FrontendError::MissingMain(self.file.to_string()))?;
        for statement in body.named_children(&mut body.walk()) {
            self.visit_statement(statement)?;
        }
        Ok(self.program)
    }

    fn visit_statement(&mut self, node: Node) -> Result<(), FrontendError> {
        match node.kind() {
            "declaration" => self.visit_declaration(node),
            "expression_statement" => self.visit_expression_statement(node),
            "return_statement" | "comment" => Ok(()),
            other => Err(self.unsupported(other, node)),
        }
    }

    /// `T a = crucible_T("a"), b = ...;`
    fn visit_declaration(&mut self, node: Node) -> Result<(), FrontendError> {
        let type_node = node
            .child_by_field_name("type")
            .ok_or_else(|| self.unsupported("declaration without type", node))?;
        let type_name = self.text(type_node);
        let ty = IntType::from_c_name(type_name)
            .ok_or_else(|| self.unsupported(format!("type {}", type_name), type_node))?;

        for declarator in node.children_by_field_name("declarator", &mut node.walk()) {
            if declarator.kind() != "init_declarator" {
                return Err(self.unsupported("declaration without initializer", declarator));
            }
            let (Some(name_node), Some(value)) = (
                declarator.child_by_field_name("declarator"),
                declarator.child_by_field_name("value"),
            ) else {
                return Err(self.unsupported("declarator", declarator));
            };
            if name_node.kind() != "identifier" {
                return Err(self.unsupported(name_node.kind(), name_node));
            }
            let variable = self.text(name_node).to_string();

            let bound = match self.symbolic_input(value)? {
                Some((symbol, input_ty)) => {
                    if input_ty != ty {
                        return Err(self.unsupported(
                            format!("{} initialised from a {} input", ty, input_ty),
                            value,
                        ));
                    }
                    self.inputs.insert(symbol.clone(), ty);
                    self.program.items.push(Item::Declare {
                        name: symbol.clone(),
                        width: ty.width,
                        signed: ty.signedness == Signedness::Signed,
                        location: Some(self.location(value)),
                    });
                    Expr::var(symbol)
                }
                None => {
                    let expr = self.visit_expression(value)?;
                    self.bind_as(expr, ty, value)?
                }
            };
            self.bindings.insert(variable, bound);
        }
        Ok(())
    }

    /// Check that `expr` can stand for a local of type `ty`. Untyped
    /// constants in it take `ty`.
    fn bind_as(&self, expr: Expr, ty: IntType, node: Node) -> Result<Expr, FrontendError> {
        if is_condition(&expr) {
            return Err(self.unsupported(
                format!("{} initialised from condition `{}`", ty, expr),
                node,
            ));
        }
        match self.type_of(&expr) {
            Some(found) if found != ty => Err(self.unsupported(
                format!("{} initialised from {} `{}`", ty, found, expr),
                node,
            )),
            Some(_) => Ok(expr),
            None => Ok(with_literal_type(expr, ty)),
        }
    }

    /// Type of an integer expression; `None` when only untyped constants
    /// decide it
    fn type_of(&self, expr: &Expr) -> Option<IntType> {
        match expr {
            Expr::Int { ty, .. } => *ty,
            Expr::Var(name) => self.inputs.get(name).copied(),
            Expr::Binary { lhs, rhs, .. } => match (self.type_of(lhs), self.type_of(rhs)) {
                (Some(l), Some(r)) if l.width == r.width => Some(IntType::common(l, r)),
                (Some(l), _) => Some(l),
                (None, r) => r,
            },
            Expr::Unary { operand, .. } => self.type_of(operand),
        }
    }

    /// `crucible_T("name")` → (name, T)
    fn symbolic_input(&self, node: Node) -> Result<Option<(String, IntType)>, FrontendError> {
        if node.kind() != "call_expression" {
            return Ok(None);
        }
        let Some(function) = node.child_by_field_name("function") else {
            return Ok(None);
        };
        let function_name = self.text(function);
        let Some(ty) = function_name
            .strip_prefix("crucible_")
            .and_then(IntType::from_c_name)
        else {
            return Ok(None);
        };

        match self.arguments(node).as_slice() {
            [arg] if arg.kind() == "string_literal" => {
                let name = self.text(*arg).trim_matches('"').to_string();
                Ok(Some((name, ty)))
            }
            _ => Err(self.unsupported(
                format!("{} without a single string argument", function_name),
                node,
            )),
        }
    }

    /// `assuming(e);`, `check(e);` and their `crucible_*` spellings
    fn visit_expression_statement(&mut self, node: Node) -> Result<(), FrontendError> {
        let Some(call) = node.named_child(0) else {
            return Ok(());
        };
        if call.kind() != "call_expression" {
            return Err(self.unsupported(call.kind(), call));
        }
        let function_name = call
            .child_by_field_name("function")
            .map(|f| self.text(f))
            .unwrap_or_default();

        let arguments = self.arguments(call);
        let Some(condition) = arguments.first() else {
            return Err(self.unsupported(format!("{} without a condition", function_name), call));
        };
        let location = Some(self.location(call));

        match function_name {
            "assuming" | "crucible_assume" => {
                let expr = self.visit_expression(*condition)?;
                self.program.items.push(Item::Assume { expr, location });
            }
            "check" | "crucible_assert" => {
                let expr = self.visit_expression(*condition)?;
                self.program.items.push(Item::Check { expr, location });
            }
            other => return Err(self.unsupported(format!("call to {}", other), call)),
        }
        Ok(())
    }

    fn visit_expression(&self, node: Node) -> Result<Expr, FrontendError> {
        match node.kind() {
            "number_literal" => parse_number(self.text(node))
                .map(Expr::int)
                .ok_or_else(|| self.unsupported(format!("literal {}", self.text(node)), node)),

            "identifier" => {
                let name = self.text(node);
                Ok(self
                    .bindings
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Expr::var(name)))
            }

            // Transparently visit the inner expression
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.visit_expression(inner),
                None => Err(self.unsupported("empty parentheses", node)),
            },

            "binary_expression" => {
                let (Some(op_node), Some(lhs), Some(rhs)) = (
                    node.child_by_field_name("operator"),
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) else {
                    return Err(self.unsupported("binary_expression", node));
                };
                let op_str = self.text(op_node);
                let op = BinOp::from_symbol(op_str)
                    .ok_or_else(|| self.unsupported(format!("operator {}", op_str), op_node))?;
                Ok(Expr::binary(
                    op,
                    self.visit_expression(lhs)?,
                    self.visit_expression(rhs)?,
                ))
            }

            "unary_expression" => {
                let (Some(op_node), Some(argument)) = (
                    node.child_by_field_name("operator"),
                    node.child_by_field_name("argument"),
                ) else {
                    return Err(self.unsupported("unary_expression", node));
                };
                let operand = self.visit_expression(argument)?;
                match (self.text(op_node), operand) {
                    ("+", operand) => Ok(operand),
                    ("-", Expr::Int { value, ty: None }) => Ok(Expr::int(-value)),
                    (op_str, operand) => {
                        let op = UnaryOp::from_symbol(op_str).ok_or_else(|| {
                            self.unsupported(format!("operator {}", op_str), op_node)
                        })?;
                        Ok(Expr::unary(op, operand))
                    }
                }
            }

            other => Err(self.unsupported(other, node)),
        }
    }

    fn arguments<'t>(&self, call: Node<'t>) -> Vec<Node<'t>> {
        match call.child_by_field_name("arguments") {
            Some(args) => args
                .named_children(&mut args.walk())
                .filter(|n| n.kind() != "comment")
                .collect(),
            None => Vec::new(),
        }
    }

    fn function_name(&self, function: Node) -> Option<&'s str> {
        let declarator = function.child_by_field_name("declarator")?;
        let name = declarator.child_by_field_name("declarator")?;
        Some(self.text(name))
    }

    fn text(&self, node: Node) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn location(&self, node: Node) -> SourceLocation {
        let pos = node.start_position();
        SourceLocation::new(self.file, pos.row as u32 + 1, pos.column as u32 + 1)
    }

    fn unsupported(&self, construct: impl Into<String>, node: Node) -> FrontendError {
        FrontendError::unsupported(construct, self.location(node))
    }

    fn syntax_error(&self, node: Node) -> FrontendError {
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let text: String = self.text(node).chars().take(40).collect();
            format!("unexpected `{}`", text.trim())
        };
        FrontendError::Syntax {
            message,
            location: self.location(node),
        }
    }
}

fn is_condition(expr: &Expr) -> bool {
    match expr {
        Expr::Binary { op, .. } => op.class() != OpClass::Arithmetic,
        Expr::Unary { op, .. } => *op == UnaryOp::Not,
        Expr::Int { .. } | Expr::Var(_) => false,
    }
}

fn with_literal_type(expr: Expr, ty: IntType) -> Expr {
    match expr {
        Expr::Int { value, ty: None } => Expr::typed_int(value, ty),
        Expr::Binary { op, lhs, rhs } => Expr::binary(
            op,
            with_literal_type(*lhs, ty),
            with_literal_type(*rhs, ty),
        ),
        Expr::Unary { op, operand } => Expr::unary(op, with_literal_type(*operand, ty)),
        other => other,
    }
}

/// Deepest-first search for the node that made the tree invalid
fn first_error(node: Node) -> Node {
    if node.is_error() || node.is_missing() {
        return node;
    }
    for child in node.children(&mut node.walk()) {
        if child.has_error() {
            return first_error(child);
        }
    }
    node
}

/// Decimal, hex or octal C integer constant, suffixes ignored
fn parse_number(text: &str) -> Option<i128> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i128::from_str_radix(hex, 16).ok()
    } else if digits.len() > 1 && digits.starts_with('0') {
        i128::from_str_radix(&digits[1..], 8).ok()
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::BitWidth;

    const ABDPAPER_8: &str = r#"#include <stdint.h>
#include <crucible.h>

int main() {
  int8_t x = crucible_int8_t("x");
  int8_t y = crucible_int8_t("y");
  int8_t z = crucible_int8_t("z");
  assuming(y > 0);
  check(x + y + z > 0);
  return 0;
}"#;

    fn parse(source: &str) -> Result<Program, FrontendError> {
        CFixtureParser::new().unwrap().parse("t.c", source)
    }

    #[test]
    fn test_parse_abdpaper() {
        let program = parse(ABDPAPER_8).unwrap();
        assert_eq!(program.name, "t.c");
        assert_eq!(program.items.len(), 5);

        match &program.items[0] {
            Item::Declare {
                name,
                width,
                signed,
                location,
            } => {
                assert_eq!(name, "x");
                assert_eq!(*width, BitWidth::W8);
                assert!(*signed);
                assert_eq!(location.as_ref(), Some(&SourceLocation::new("t.c", 5, 14)));
            }
            other => panic!("expected declaration, got {:?}", other),
        }

        match &program.items[4] {
            Item::Check { expr, location } => {
                assert_eq!(expr.to_string(), "(((x + y) + z) > 0)");
                assert_eq!(location.as_ref(), Some(&SourceLocation::new("t.c", 9, 3)));
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_crucible_spellings_and_locals() {
        let source = r#"
int main(void) {
  uint16_t a = crucible_uint16_t("a");
  uint16_t limit = 0x10;
  crucible_assume(a < limit);
  crucible_assert(a != -1, __FILE__, __LINE__);
  return 0;
}"#;
        let program = parse(source).unwrap();
        assert_eq!(program.items.len(), 3);
        assert!(matches!(
            &program.items[0],
            Item::Declare { width: BitWidth::W16, signed: false, .. }
        ));
        match &program.items[1] {
            Item::Assume { expr, .. } => {
                assert_eq!(
                    expr,
                    &Expr::var("a").lt(Expr::typed_int(16, IntType::unsigned(BitWidth::W16)))
                );
            }
            other => panic!("expected assumption, got {:?}", other),
        }
        match &program.items[2] {
            Item::Check { expr, .. } => assert_eq!(expr.to_string(), "(a != -1)"),
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_local_must_match_declared_type() {
        let widened = r#"
int main() {
  int8_t x = crucible_int8_t("x");
  int32_t w = x;
  assuming(x > 0);
  check(w + 1 > 0);
}"#;
        match parse(widened).unwrap_err() {
            FrontendError::Unsupported {
                construct,
                location,
            } => {
                assert_eq!(construct, "int32_t initialised from int8_t `x`");
                assert_eq!(location, SourceLocation::new("t.c", 4, 15));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let resigned = "int main() {\n  int8_t x = crucible_int8_t(\"x\");\n  uint8_t u = x + 1;\n}";
        assert!(matches!(
            parse(resigned).unwrap_err(),
            FrontendError::Unsupported { ref construct, .. } if construct.starts_with("uint8_t initialised from int8_t")
        ));
    }

    #[test]
    fn test_local_of_matching_type_is_substituted() {
        let source = r#"
int main() {
  int8_t x = crucible_int8_t("x");
  int8_t next = x + 1;
  int8_t k = 3 + 4;
  check(next > k);
}"#;
        let program = parse(source).unwrap();
        let int8 = IntType::signed(BitWidth::W8);
        match &program.items[1] {
            Item::Check { expr, .. } => assert_eq!(
                expr,
                &(Expr::var("x") + Expr::int(1))
                    .gt(Expr::typed_int(3, int8) + Expr::typed_int(4, int8))
            ),
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_local_bound_to_condition_rejected() {
        let source = "int main() {\n  int8_t x = crucible_int8_t(\"x\");\n  int32_t b = x > 0;\n}";
        assert!(matches!(
            parse(source).unwrap_err(),
            FrontendError::Unsupported { ref construct, .. } if construct.starts_with("int32_t initialised from condition")
        ));
    }

    #[test]
    fn test_unsupported_statement() {
        let source = "int main() {\n  int8_t x = crucible_int8_t(\"x\");\n  if (x) { check(x); }\n}";
        let err = parse(source).unwrap_err();
        match err {
            FrontendError::Unsupported {
                construct,
                location,
            } => {
                assert_eq!(construct, "if_statement");
                assert_eq!(location.line, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_call() {
        let err = parse("int main() { printf(\"hi\"); }").unwrap_err();
        assert!(matches!(err, FrontendError::Unsupported { ref construct, .. } if construct == "call to printf"));
    }

    #[test]
    fn test_non_fixed_width_type_rejected() {
        let err = parse("int main() { long x = 3; }").unwrap_err();
        assert!(matches!(err, FrontendError::Unsupported { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse("int main() {\n  check(x + );\n}").unwrap_err();
        assert!(matches!(err, FrontendError::Syntax { .. }));
    }

    #[test]
    fn test_missing_main() {
        let err = parse("#include <stdint.h>\n").unwrap_err();
        assert_eq!(err, FrontendError::MissingMain("t.c".to_string()));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("0x7f"), Some(127));
        assert_eq!(parse_number("0"), Some(0));
        assert_eq!(parse_number("010"), Some(8));
        assert_eq!(parse_number("255u"), Some(255));
        assert_eq!(parse_number("1.5"), None);
    }
}

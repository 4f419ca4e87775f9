use super::expression::{JavaExpr, string_literal};
use super::types::JavaType;
use std::fmt;

/// Name of the class-level `java.util.Scanner` field that INPUT blocks read from.
pub const INPUT_SCANNER: &str = "STDIN";

/// Name of the exception caught around an INPUT read.
pub const INPUT_ERROR: &str = "inputError";

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
pub enum JavaStmt {
    Expression(JavaExpr),
    Assign {
        target: JavaExpr,
        value: JavaExpr,
    },
    Return(Option<JavaExpr>),
    If {
        condition: JavaExpr,
        then_branch: Vec<JavaStmt>,
        else_branch: Option<Vec<JavaStmt>>,
    },
    LocalVariable {
        java_type: JavaType,
        name: String,
        initializer: JavaExpr,
    },
    Print(JavaExpr),
    /// Reads one value from standard input, falling back to `fallback` and a
    /// warning on stderr when the input does not parse.
    ReadInput {
        target: JavaExpr,
        method: &'static str,
        fallback: JavaExpr,
    },
}

pub(crate) fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl JavaStmt {
    pub(crate) fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        match self {
            JavaStmt::Expression(expr) => writeln!(f, "{};", expr),
            JavaStmt::Assign { target, value } => writeln!(f, "{} = {};", target, value),
            JavaStmt::Return(None) => writeln!(f, "return;"),
            JavaStmt::Return(Some(expr)) => writeln!(f, "return {};", expr),
            JavaStmt::LocalVariable {
                java_type,
                name,
                initializer,
            } => writeln!(f, "{} {} = {};", java_type, name, initializer),
            JavaStmt::Print(expr) => writeln!(f, "System.out.println({});", expr),
            JavaStmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "if ({}) {{", condition)?;
                fmt_block(f, then_branch, depth + 1)?;
                indent(f, depth)?;
                match else_branch {
                    Some(statements) => {
                        writeln!(f, "}} else {{")?;
                        fmt_block(f, statements, depth + 1)?;
                        indent(f, depth)?;
                        writeln!(f, "}}")
                    }
                    None => writeln!(f, "}}"),
                }
            }
            JavaStmt::ReadInput {
                target,
                method,
                fallback,
            } => {
                let warning = format!("Entered value not correct, using {} instead", fallback);
                writeln!(f, "try {{")?;
                indent(f, depth + 1)?;
                writeln!(f, "{} = {}.{}();", target, INPUT_SCANNER, method)?;
                indent(f, depth)?;
                writeln!(f, "}} catch (Exception {}) {{", INPUT_ERROR)?;
                indent(f, depth + 1)?;
                writeln!(f, "{} = {};", target, fallback)?;
                indent(f, depth + 1)?;
                writeln!(f, "System.err.println({});", string_literal(&warning))?;
                // A mismatched token stays in the scanner; drop it so the next read moves on.
                indent(f, depth + 1)?;
                writeln!(f, "if ({}.hasNext()) {{", INPUT_SCANNER)?;
                indent(f, depth + 2)?;
                writeln!(f, "{}.next();", INPUT_SCANNER)?;
                indent(f, depth + 1)?;
                writeln!(f, "}}")?;
                indent(f, depth)?;
                writeln!(f, "}}")
            }
        }
    }
}

pub(crate) fn fmt_block(
    f: &mut fmt::Formatter<'_>,
    statements: &[JavaStmt],
    depth: usize,
) -> fmt::Result {
    for statement in statements {
        statement.fmt_at(f, depth)?;
    }
    Ok(())
}

impl fmt::Display for JavaStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

/// Displays a statement list at indentation depth zero, one statement per line.
pub struct DisplayBody<'a>(pub &'a [JavaStmt]);

impl fmt::Display for DisplayBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_block(f, self.0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_without_else_closes_on_one_line() {
        let stmt = JavaStmt::If {
            condition: JavaExpr::Boolean(true),
            then_branch: vec![JavaStmt::Return(None)],
            else_branch: None,
        };
        assert_eq!(stmt.to_string(), "if (true) {\n    return;\n}\n");
    }

    #[test]
    fn empty_then_branch_still_renders_braces() {
        let stmt = JavaStmt::If {
            condition: JavaExpr::name("done"),
            then_branch: vec![],
            else_branch: Some(vec![JavaStmt::Print(JavaExpr::Text("no".to_string()))]),
        };
        assert_eq!(
            stmt.to_string(),
            "if (done) {\n} else {\n    System.out.println(\"no\");\n}\n"
        );
    }

    #[test]
    fn input_reads_are_guarded() {
        let stmt = JavaStmt::ReadInput {
            target: JavaExpr::name("age"),
            method: "nextDouble",
            fallback: JavaExpr::Number(0.0),
        };
        let expected = "try {\n    age = STDIN.nextDouble();\n} catch (Exception inputError) {\n    age = 0.0;\n    System.err.println(\"Entered value not correct, using 0.0 instead\");\n    if (STDIN.hasNext()) {\n        STDIN.next();\n    }\n}\n";
        assert_eq!(stmt.to_string(), expected);
    }

    #[test]
    fn nested_input_reads_skip_the_rejected_token() {
        let stmt = JavaStmt::If {
            condition: JavaExpr::Boolean(true),
            then_branch: vec![JavaStmt::ReadInput {
                target: JavaExpr::name("word"),
                method: "next",
                fallback: JavaExpr::Text(String::new()),
            }],
            else_branch: None,
        };
        let rendered = stmt.to_string();
        assert!(rendered.contains("    } catch (Exception inputError) {\n"));
        assert!(rendered.contains("\n        if (STDIN.hasNext()) {\n            STDIN.next();\n        }\n    }\n}\n"));
    }
}

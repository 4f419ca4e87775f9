use super::types::JavaType;
use std::fmt;

/// A Java expression. Every compound form renders with its own parentheses, so
/// nested expressions never depend on Java operator precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum JavaExpr {
    Number(f64),
    Boolean(bool),
    Text(String),
    New {
        java_type: JavaType,
        arguments: Vec<JavaExpr>,
    },
    /// A plain or dotted name (`x`, `Demo.app.counter.counter`, `System.in`).
    Name(String),
    Invoke {
        name: String,
        arguments: Vec<JavaExpr>,
    },
    /// Call steps joined with `.`.
    Chain(Vec<JavaExpr>),
    /// `(a OP b OP c)`.
    Infix {
        operator: &'static str,
        operands: Vec<JavaExpr>,
    },
    Not(Box<JavaExpr>),
    Length(Box<JavaExpr>),
    StringOf(Box<JavaExpr>),
    ObjectsEquals(Box<JavaExpr>, Box<JavaExpr>),
    Group(Box<JavaExpr>),
}

impl JavaExpr {
    pub fn name(name: impl Into<String>) -> Self {
        JavaExpr::Name(name.into())
    }

    pub fn new_instance(java_type: JavaType) -> Self {
        JavaExpr::New {
            java_type,
            arguments: Vec::new(),
        }
    }
}

/// Renders `value` as a Java `double` literal.
pub fn double_literal(value: f64) -> String {
    if value.is_nan() {
        "Double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Double.POSITIVE_INFINITY".to_string()
        } else {
            "Double.NEGATIVE_INFINITY".to_string()
        }
    } else {
        // Debug keeps the fractional part (`5.0`) and switches to exponent form
        // for very large or small magnitudes (`1e20`), both valid Java doubles.
        format!("{:?}", value)
    }
}

/// Renders `value` as a quoted Java string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[JavaExpr], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for JavaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaExpr::Number(n) => f.write_str(&double_literal(*n)),
            JavaExpr::Boolean(b) => write!(f, "{}", b),
            JavaExpr::Text(s) => f.write_str(&string_literal(s)),
            JavaExpr::New {
                java_type,
                arguments,
            } => {
                write!(f, "new {}(", java_type)?;
                write_list(f, arguments, ", ")?;
                f.write_str(")")
            }
            JavaExpr::Name(name) => f.write_str(name),
            JavaExpr::Invoke { name, arguments } => {
                write!(f, "{}(", name)?;
                write_list(f, arguments, ", ")?;
                f.write_str(")")
            }
            JavaExpr::Chain(steps) => write_list(f, steps, "."),
            JavaExpr::Infix { operator, operands } => {
                f.write_str("(")?;
                write_list(f, operands, &format!(" {} ", operator))?;
                f.write_str(")")
            }
            JavaExpr::Not(inner) => write!(f, "(!{})", inner),
            JavaExpr::Length(inner) => write!(f, "((double) {}.length())", inner),
            JavaExpr::StringOf(inner) => write!(f, "String.valueOf({})", inner),
            JavaExpr::ObjectsEquals(left, right) => {
                write!(f, "java.util.Objects.equals({}, {})", left, right)
            }
            JavaExpr::Group(inner) => write!(f, "({})", inner),
        }
    }
}

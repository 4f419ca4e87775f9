use crate::project::{StatementKind, ValueType};

/// How an operator's compiled operands are combined into Java.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// `(a OP b OP c ...)`.
    Infix(&'static str),
    /// Every operand wrapped in `String.valueOf`, joined with `+`.
    Concat,
    Not,
    Length,
    /// Pairwise over consecutive operands, conjoined with `&&` beyond two.
    Comparison(&'static str),
    Equality { negated: bool },
}

/// Minimum and maximum operand count. `max: None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    pub fn describe(self) -> String {
        match self.max {
            Some(max) if max == self.min => format!("exactly {}", max),
            Some(max) => format!("{} to {}", self.min, max),
            None => format!("at least {}", self.min),
        }
    }
}

/// Defines the operator enum and its lookup table in one place.
macro_rules! define_operators {
    ( $( ($variant:ident, $name:expr, $form:expr, $min:expr, $max:expr, $operand:expr) ),* $(,)? ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator {
            $( $variant, )*
        }

        impl Operator {
            /// The operator a statement kind stands for. `None` for literals and calls.
            pub fn from_kind(kind: StatementKind) -> Option<Self> {
                match kind {
                    $( StatementKind::$variant => Some(Operator::$variant), )*
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( Operator::$variant => $name, )*
                }
            }

            pub fn form(self) -> Form {
                match self {
                    $( Operator::$variant => $form, )*
                }
            }

            pub fn arity(self) -> Arity {
                match self {
                    $( Operator::$variant => Arity { min: $min, max: $max }, )*
                }
            }

            /// The type every operand must have, when the operator fixes one.
            pub fn operand_type(self) -> Option<ValueType> {
                match self {
                    $( Operator::$variant => $operand, )*
                }
            }
        }
    };
}

define_operators! {
    // Arithmetic
    (Add, "ADD", Form::Infix("+"), 2, None, Some(ValueType::Number)),
    (Subtract, "SUBTRACT", Form::Infix("-"), 2, None, Some(ValueType::Number)),
    (Multiply, "MULTIPLY", Form::Infix("*"), 2, None, Some(ValueType::Number)),
    (Divide, "DIVIDE", Form::Infix("/"), 2, None, Some(ValueType::Number)),
    (Modulo, "MODULO", Form::Infix("%"), 2, None, Some(ValueType::Number)),

    // Logic
    (And, "AND", Form::Infix("&&"), 2, None, Some(ValueType::Boolean)),
    (Or, "OR", Form::Infix("||"), 2, None, Some(ValueType::Boolean)),
    (Not, "NOT", Form::Not, 1, Some(1), Some(ValueType::Boolean)),

    // Text
    (Concat, "CONCAT", Form::Concat, 2, None, None),
    (Length, "LENGTH", Form::Length, 1, Some(1), Some(ValueType::Text)),

    // Comparison
    (GreaterThan, "GREATER_THAN", Form::Comparison(">"), 2, None, Some(ValueType::Number)),
    (LessThan, "LESS_THAN", Form::Comparison("<"), 2, None, Some(ValueType::Number)),
    (GreaterOrEqualThan, "GREATER_OR_EQUAL_THAN", Form::Comparison(">="), 2, None, Some(ValueType::Number)),
    (LessOrEqualThan, "LESS_OR_EQUAL_THAN", Form::Comparison("<="), 2, None, Some(ValueType::Number)),
    (Equals, "EQUALS", Form::Equality { negated: false }, 2, None, None),
    (NotEquals, "NOT_EQUALS", Form::Equality { negated: true }, 2, None, None),
}

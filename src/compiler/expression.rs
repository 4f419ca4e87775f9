use super::operators::{Form, Operator};
use super::types::{TypeResolver, qualified_reference};
use crate::ast::JavaExpr;
use crate::error::CompileError;
use crate::index::ResolutionIndex;
use crate::project::{Call, ItemKind, Statement, StatementKind};
use itertools::Itertools;
use serde_json::Value;

/// Compiles statement trees into Java expressions.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionCompiler<'a> {
    index: &'a ResolutionIndex<'a>,
    types: TypeResolver<'a>,
}

impl<'a> ExpressionCompiler<'a> {
    pub fn new(index: &'a ResolutionIndex<'a>) -> Self {
        Self {
            index,
            types: TypeResolver::new(index),
        }
    }

    pub fn compile(&self, statement: &Statement) -> Result<JavaExpr, CompileError> {
        match statement.kind {
            StatementKind::Number
            | StatementKind::Boolean
            | StatementKind::Text
            | StatementKind::Object => self.compile_literal(statement),
            StatementKind::Call => self.compile_calls(&statement.calls),
            kind => {
                let operator =
                    Operator::from_kind(kind).ok_or_else(|| CompileError::InvalidLiteral {
                        kind,
                        message: "not an operator".to_string(),
                    })?;
                self.compile_operation(operator, &statement.operands)
            }
        }
    }

    fn compile_literal(&self, statement: &Statement) -> Result<JavaExpr, CompileError> {
        let kind = statement.kind;
        let invalid = |message: &str| CompileError::InvalidLiteral {
            kind,
            message: message.to_string(),
        };
        let value = statement
            .value
            .as_ref()
            .ok_or_else(|| invalid("missing value"))?;

        match kind {
            StatementKind::Number => {
                let number = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                number
                    .map(JavaExpr::Number)
                    .ok_or_else(|| invalid(&format!("'{}' is not a number", value)))
            }
            StatementKind::Boolean => match value {
                Value::Bool(b) => Ok(JavaExpr::Boolean(*b)),
                Value::String(s) => s
                    .parse::<bool>()
                    .map(JavaExpr::Boolean)
                    .map_err(|_| invalid(&format!("'{}' is not true or false", s))),
                other => Err(invalid(&format!("'{}' is not true or false", other))),
            },
            StatementKind::Text => match value {
                Value::String(s) => Ok(JavaExpr::Text(s.clone())),
                Value::Number(_) | Value::Bool(_) => Ok(JavaExpr::Text(value.to_string())),
                other => Err(invalid(&format!("'{}' is not a text value", other))),
            },
            _ => {
                let type_name = value
                    .as_str()
                    .ok_or_else(|| invalid("object literals need a type name"))?;
                let java_type = self.types.resolve(type_name)?;
                Ok(JavaExpr::new_instance(java_type))
            }
        }
    }

    fn compile_operation(
        &self,
        operator: Operator,
        operands: &[Statement],
    ) -> Result<JavaExpr, CompileError> {
        let arity = operator.arity();
        let arity_error = || CompileError::Arity {
            operator: operator.name(),
            expected: arity.describe(),
            found: operands.len(),
        };
        if !arity.accepts(operands.len()) {
            return Err(arity_error());
        }

        if let Some(expected) = operator.operand_type() {
            for (position, operand) in operands.iter().enumerate() {
                if let Some(found) = operand.value_type() {
                    if found != expected {
                        return Err(CompileError::OperandType {
                            operator: operator.name(),
                            position,
                            expected,
                            found,
                        });
                    }
                }
            }
        }

        let compiled = operands
            .iter()
            .map(|operand| self.compile(operand))
            .collect::<Result<Vec<_>, _>>()?;

        let expr = match operator.form() {
            Form::Infix(token) => JavaExpr::Infix {
                operator: token,
                operands: compiled,
            },
            Form::Concat => JavaExpr::Infix {
                operator: "+",
                operands: compiled
                    .into_iter()
                    .map(|operand| JavaExpr::StringOf(Box::new(operand)))
                    .collect(),
            },
            Form::Not => {
                let operand = compiled.into_iter().exactly_one().map_err(|_| arity_error())?;
                JavaExpr::Not(Box::new(operand))
            }
            Form::Length => {
                let operand = compiled.into_iter().exactly_one().map_err(|_| arity_error())?;
                JavaExpr::Length(Box::new(operand))
            }
            Form::Comparison(token) => pairwise(compiled, |left, right| JavaExpr::Infix {
                operator: token,
                operands: vec![left, right],
            }),
            Form::Equality { negated } => pairwise(compiled, |left, right| {
                let equals = Box::new(JavaExpr::ObjectsEquals(Box::new(left), Box::new(right)));
                if negated {
                    JavaExpr::Not(equals)
                } else {
                    JavaExpr::Group(equals)
                }
            }),
        };
        Ok(expr)
    }

    fn compile_calls(&self, calls: &[Call]) -> Result<JavaExpr, CompileError> {
        let mut steps = calls
            .iter()
            .map(|call| self.compile_step(call))
            .collect::<Result<Vec<_>, _>>()?;

        match steps.len() {
            0 => Err(CompileError::EmptyCall),
            1 => Ok(steps.remove(0)),
            _ => Ok(JavaExpr::Chain(steps)),
        }
    }

    fn compile_step(&self, call: &Call) -> Result<JavaExpr, CompileError> {
        let entry = self.index.resolve(&call.target)?;
        match entry.kind() {
            ItemKind::Variable | ItemKind::Parameter => {
                Ok(JavaExpr::Name(qualified_reference(entry)))
            }
            ItemKind::Function => {
                let arguments = call
                    .arguments
                    .iter()
                    .map(|argument| self.compile(argument))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(JavaExpr::Invoke {
                    name: qualified_reference(entry),
                    arguments,
                })
            }
            kind => Err(CompileError::NotCallable {
                name: call.target.clone(),
                kind,
            }),
        }
    }
}

/// Applies `compare` to each consecutive operand pair. Two operands give one
/// comparison, more give the conjunction of all pairs.
fn pairwise(
    operands: Vec<JavaExpr>,
    compare: impl Fn(JavaExpr, JavaExpr) -> JavaExpr,
) -> JavaExpr {
    let pairs = operands
        .into_iter()
        .tuple_windows()
        .map(|(left, right)| compare(left, right));

    match pairs.exactly_one() {
        Ok(comparison) => comparison,
        Err(all) => JavaExpr::Infix {
            operator: "&&",
            operands: all.collect(),
        },
    }
}

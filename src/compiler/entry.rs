use super::types::{BOOLEAN, NUMBER, TEXT};
use crate::ast::{JavaExpr, JavaMethod, JavaParameter, JavaStmt, JavaType, Modifier};
use crate::error::CompileError;
use crate::project::{Item, ItemKind};
use std::collections::BTreeMap;

/// Builds `public static void main(String[] args)` calling `function` with the
/// supplied parameter values, in declared parameter order.
///
/// The supplied names must match the declared parameters exactly. Each value is
/// checked against its parameter's type and turned into a Java literal.
pub fn bootstrap(
    function: &Item,
    full_name: &str,
    supplied: &BTreeMap<String, String>,
) -> Result<JavaMethod, CompileError> {
    let declared: Vec<&Item> = function.children_of_kind(ItemKind::Parameter).collect();

    let mut expected: Vec<String> = declared.iter().map(|p| p.name.clone()).collect();
    expected.sort();
    let actual: Vec<String> = supplied.keys().cloned().collect();
    if expected != actual {
        return Err(CompileError::EntryParameterMismatch {
            function: full_name.to_string(),
            expected: declared.iter().map(|p| p.name.clone()).collect(),
            actual,
        });
    }

    let arguments = declared
        .iter()
        .map(|parameter| {
            let value = supplied.get(&parameter.name).map(String::as_str).unwrap_or_default();
            argument(parameter, value)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(JavaMethod {
        doc: Vec::new(),
        modifiers: vec![Modifier::Public, Modifier::Static],
        return_type: JavaType::Void,
        name: "main".to_string(),
        parameters: vec![JavaParameter {
            java_type: JavaType::Array(Box::new(JavaType::String)),
            name: "args".to_string(),
        }],
        body: vec![JavaStmt::Expression(JavaExpr::Invoke {
            name: format!("{}.{}", full_name, function.name),
            arguments,
        })],
    })
}

fn argument(parameter: &Item, value: &str) -> Result<JavaExpr, CompileError> {
    let invalid = |message: String| CompileError::InvalidEntryArgument {
        parameter: parameter.name.clone(),
        value: value.to_string(),
        message,
    };

    match parameter.type_name.as_deref() {
        Some(NUMBER) => value
            .trim()
            .parse::<f64>()
            .map(JavaExpr::Number)
            .map_err(|_| invalid("expected a number".to_string())),
        Some(BOOLEAN) => value
            .trim()
            .parse::<bool>()
            .map(JavaExpr::Boolean)
            .map_err(|_| invalid("expected true or false".to_string())),
        Some(TEXT) => Ok(JavaExpr::Text(value.to_string())),
        Some(other) => Err(invalid(format!(
            "parameters of type '{}' cannot be supplied on the command line",
            other
        ))),
        None => Err(CompileError::MissingType {
            name: parameter.name.clone(),
        }),
    }
}

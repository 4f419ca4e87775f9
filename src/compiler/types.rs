use crate::ast::{JavaExpr, JavaType};
use crate::error::CompileError;
use crate::index::{IndexedItem, ResolutionIndex};
use crate::project::ItemKind;

pub const NUMBER: &str = "NUMBER";
pub const BOOLEAN: &str = "BOOLEAN";
pub const TEXT: &str = "TEXT";
pub const VOID: &str = "VOID";

/// Maps type names from the project model onto Java types.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    index: &'a ResolutionIndex<'a>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(index: &'a ResolutionIndex<'a>) -> Self {
        Self { index }
    }

    /// Resolves the type of a value: a variable, parameter or literal object.
    pub fn resolve(&self, type_name: &str) -> Result<JavaType, CompileError> {
        match type_name {
            NUMBER => Ok(JavaType::Double),
            BOOLEAN => Ok(JavaType::Boolean),
            TEXT => Ok(JavaType::String),
            _ => match self.index.item(type_name) {
                Some(entry) if entry.kind() == ItemKind::Class => {
                    Ok(JavaType::Class(entry.full_name.clone()))
                }
                _ => Err(CompileError::UnresolvedType {
                    name: type_name.to_string(),
                }),
            },
        }
    }

    /// Like [`resolve`](Self::resolve), but also accepts `VOID`.
    pub fn resolve_return(&self, type_name: &str) -> Result<JavaType, CompileError> {
        if type_name == VOID {
            Ok(JavaType::Void)
        } else {
            self.resolve(type_name)
        }
    }

    /// Resolves the declared type of a variable or parameter.
    pub fn resolve_item(&self, entry: &IndexedItem<'_>) -> Result<JavaType, CompileError> {
        let type_name =
            entry
                .item
                .type_name
                .as_deref()
                .ok_or_else(|| CompileError::MissingType {
                    name: entry.full_name.clone(),
                })?;
        self.resolve(type_name)
    }
}

/// The value fields and locals start with.
pub fn default_value(java_type: &JavaType) -> Result<JavaExpr, CompileError> {
    match java_type {
        JavaType::Double => Ok(JavaExpr::Number(0.0)),
        JavaType::Boolean => Ok(JavaExpr::Boolean(false)),
        JavaType::String => Ok(JavaExpr::Text(String::new())),
        JavaType::Class(_) => Ok(JavaExpr::new_instance(java_type.clone())),
        JavaType::Void | JavaType::Array(_) => Err(CompileError::NoDefaultValue {
            java_type: java_type.to_string(),
        }),
    }
}

/// The `java.util.Scanner` method that reads a value of `java_type`, if any.
pub fn input_method(java_type: &JavaType) -> Option<&'static str> {
    match java_type {
        JavaType::Double => Some("nextDouble"),
        JavaType::Boolean => Some("nextBoolean"),
        JavaType::String => Some("next"),
        _ => None,
    }
}

/// How generated code refers to a variable, parameter or function.
///
/// Static members live in a class named after themselves, so they are reached
/// through `<full name>.<name>`. Everything else is referenced by its plain name.
pub fn qualified_reference(entry: &IndexedItem<'_>) -> String {
    if entry.is_static() {
        format!("{}.{}", entry.full_name, entry.item.name)
    } else {
        entry.item.name.clone()
    }
}

use super::GeneratedFile;
use super::block::compile_function_body;
use super::entry::bootstrap;
use super::options::CompileOptions;
use super::types::{TypeResolver, default_value};
use crate::ast::{
    INPUT_ERROR, INPUT_SCANNER, JavaClass, JavaExpr, JavaField, JavaFile, JavaMethod, JavaParameter, JavaStmt,
    JavaType, Modifier,
};
use crate::error::CompileError;
use crate::index::{ResolutionIndex, join_name};
use crate::project::{Item, ItemKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Identity marker written into the project directory.
pub const PROJECT_MARKER: &str = "id.txt";
/// Comments of projects and packages, written next to their sources.
pub const COMMENTS_FILE: &str = "comments.html";

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "var", "yield", "record",
];

/// Whether `name` can be used as a Java class, package, field or variable name.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&name)
        && name != "_"
}

/// Simple names the generated code refers to unqualified. An item with one of
/// these names would hide the `java.lang` class or package it stands for.
const RESERVED_NAMES: &[&str] = &[
    "System", "String", "Double", "Objects", "Exception", "java", INPUT_SCANNER, INPUT_ERROR,
];

/// Checks that `item` can be declared in the project named `project`.
///
/// Static references start with the project name, so no other item may take it.
fn check_identifier(item: &Item, project: &str) -> Result<(), CompileError> {
    if !is_java_identifier(&item.name) {
        return Err(CompileError::InvalidIdentifier {
            name: item.name.clone(),
        });
    }
    if RESERVED_NAMES.contains(&item.name.as_str()) {
        return Err(CompileError::ReservedName {
            name: item.name.clone(),
        });
    }
    if item.kind != ItemKind::Project && item.name == project {
        return Err(CompileError::ShadowsProject {
            name: item.name.clone(),
            project: project.to_string(),
        });
    }
    Ok(())
}

/// The first segment of a full name.
fn project_of(full_name: &str) -> &str {
    full_name.split_once('.').map_or(full_name, |(root, _)| root)
}

/// A CLASS, package-level FUNCTION or package-level VARIABLE. Each becomes one file.
#[derive(Debug, Clone)]
pub struct DeclarationUnit<'a> {
    pub item: &'a Item,
    pub full_name: String,
    /// Java package, the full name of the enclosing package.
    pub package: String,
    pub directory: PathBuf,
}

/// Everything the declaration tree yields before any function body is compiled.
#[derive(Debug, Default)]
pub(crate) struct Layout<'a> {
    pub directories: Vec<PathBuf>,
    pub files: Vec<GeneratedFile>,
    pub units: Vec<DeclarationUnit<'a>>,
}

/// Walks the project and package levels of the tree, collecting directories,
/// marker and comment files, and the declaration units to compile.
pub(crate) fn plan(root: &Item, include_comments: bool) -> Result<Layout<'_>, CompileError> {
    if root.kind != ItemKind::Project {
        return Err(CompileError::InvalidItem {
            name: root.name.clone(),
            message: format!("the root item must be a PROJECT, not a {}", root.kind),
        });
    }
    let id = root.id.ok_or_else(|| CompileError::InvalidItem {
        name: root.name.clone(),
        message: "projects need an id".to_string(),
    })?;
    check_identifier(root, &root.name)?;

    let mut layout = Layout::default();
    let directory = PathBuf::from(&root.name);
    layout.directories.push(directory.clone());
    layout.files.push(GeneratedFile {
        path: directory.join(PROJECT_MARKER),
        contents: format!("{}\n", id),
    });
    plan_comments(root, &directory, include_comments, &mut layout);

    for child in &root.children {
        plan_item(child, &root.name, &directory, include_comments, &mut layout)?;
    }
    debug!(
        directories = layout.directories.len(),
        declarations = layout.units.len(),
        "planned project layout"
    );
    Ok(layout)
}

fn plan_item<'a>(
    item: &'a Item,
    parent_name: &str,
    directory: &Path,
    include_comments: bool,
    layout: &mut Layout<'a>,
) -> Result<(), CompileError> {
    check_identifier(item, project_of(parent_name))?;
    let full_name = join_name(parent_name, &item.name);

    match item.kind {
        ItemKind::Package => {
            let directory = directory.join(&item.name);
            layout.directories.push(directory.clone());
            plan_comments(item, &directory, include_comments, layout);
            for child in &item.children {
                plan_item(child, &full_name, &directory, include_comments, layout)?;
            }
            Ok(())
        }
        ItemKind::Class | ItemKind::Function | ItemKind::Variable => {
            layout.units.push(DeclarationUnit {
                item,
                full_name,
                package: parent_name.to_string(),
                directory: directory.to_path_buf(),
            });
            Ok(())
        }
        ItemKind::Parameter => Err(CompileError::InvalidItem {
            name: full_name,
            message: "parameters can only be declared inside functions".to_string(),
        }),
        ItemKind::Project => Err(CompileError::InvalidItem {
            name: full_name,
            message: "projects cannot be nested".to_string(),
        }),
    }
}

fn plan_comments(item: &Item, directory: &Path, include_comments: bool, layout: &mut Layout<'_>) {
    if include_comments && !item.comments.trim().is_empty() {
        layout.files.push(GeneratedFile {
            path: directory.join(COMMENTS_FILE),
            contents: item.comments.clone(),
        });
    }
}

fn comment_lines(comments: &str) -> Vec<String> {
    comments
        .trim()
        .lines()
        .map(|line| line.trim_end().replace("*/", "*&#47;"))
        .collect()
}

fn scanner_field() -> JavaField {
    let scanner = JavaType::Class("java.util.Scanner".to_string());
    JavaField {
        doc: Vec::new(),
        modifiers: vec![Modifier::Private, Modifier::Static, Modifier::Final],
        java_type: scanner.clone(),
        name: INPUT_SCANNER.to_string(),
        initializer: JavaExpr::New {
            java_type: scanner,
            arguments: vec![JavaExpr::name("System.in")],
        },
    }
}

/// Turns declaration units into Java source files.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationEmitter<'a> {
    index: &'a ResolutionIndex<'a>,
    options: &'a CompileOptions,
    types: TypeResolver<'a>,
}

impl<'a> DeclarationEmitter<'a> {
    pub fn new(index: &'a ResolutionIndex<'a>, options: &'a CompileOptions) -> Self {
        Self {
            index,
            options,
            types: TypeResolver::new(index),
        }
    }

    pub fn emit(&self, unit: &DeclarationUnit<'_>) -> Result<GeneratedFile, CompileError> {
        debug!(declaration = %unit.full_name, kind = %unit.item.kind, "emitting declaration");
        let class = match unit.item.kind {
            ItemKind::Class => self.class(unit)?,
            ItemKind::Function => self.static_function(unit)?,
            ItemKind::Variable => self.static_variable(unit)?,
            other => {
                return Err(CompileError::InvalidItem {
                    name: unit.full_name.clone(),
                    message: format!("a {} is not a declaration", other),
                });
            }
        };

        let file = JavaFile {
            package: unit.package.clone(),
            class,
        };
        Ok(GeneratedFile {
            path: unit.directory.join(format!("{}.java", unit.item.name)),
            contents: file.to_string(),
        })
    }

    fn class(&self, unit: &DeclarationUnit<'_>) -> Result<JavaClass, CompileError> {
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut reads_input = false;

        for child in &unit.item.children {
            check_identifier(child, project_of(&unit.full_name))?;
            let child_name = join_name(&unit.full_name, &child.name);
            match child.kind {
                ItemKind::Variable => {
                    fields.push(self.field(child, &child_name, vec![Modifier::Public])?)
                }
                ItemKind::Function => {
                    let (method, reads) = self.method(child, &child_name, false)?;
                    reads_input |= reads;
                    methods.push(method);
                }
                other => {
                    return Err(CompileError::InvalidItem {
                        name: child_name,
                        message: format!("a CLASS cannot contain a {}", other),
                    });
                }
            }
        }
        if reads_input {
            fields.insert(0, scanner_field());
        }

        Ok(JavaClass {
            doc: self.doc(unit.item),
            name: unit.item.name.clone(),
            fields,
            methods,
        })
    }

    fn static_variable(&self, unit: &DeclarationUnit<'_>) -> Result<JavaClass, CompileError> {
        let field = self.field(
            unit.item,
            &unit.full_name,
            vec![Modifier::Public, Modifier::Static],
        )?;
        Ok(JavaClass {
            doc: Vec::new(),
            name: unit.item.name.clone(),
            fields: vec![field],
            methods: Vec::new(),
        })
    }

    fn static_function(&self, unit: &DeclarationUnit<'_>) -> Result<JavaClass, CompileError> {
        let (method, reads_input) = self.method(unit.item, &unit.full_name, true)?;
        let mut methods = vec![method];
        if self.options.entry_function.as_deref() == Some(unit.full_name.as_str()) {
            methods.push(bootstrap(
                unit.item,
                &unit.full_name,
                &self.options.parameters,
            )?);
        }

        let fields = if reads_input {
            vec![scanner_field()]
        } else {
            Vec::new()
        };
        Ok(JavaClass {
            doc: Vec::new(),
            name: unit.item.name.clone(),
            fields,
            methods,
        })
    }

    fn field(
        &self,
        item: &Item,
        full_name: &str,
        modifiers: Vec<Modifier>,
    ) -> Result<JavaField, CompileError> {
        let java_type = self.types.resolve_item(self.index.resolve(full_name)?)?;
        Ok(JavaField {
            doc: self.doc(item),
            modifiers,
            initializer: default_value(&java_type)?,
            java_type,
            name: item.name.clone(),
        })
    }

    /// Builds a method from a FUNCTION item: parameters, locals initialised to their
    /// defaults, then the compiled flow graph. Also reports whether it reads input.
    fn method(
        &self,
        function: &Item,
        full_name: &str,
        is_static: bool,
    ) -> Result<(JavaMethod, bool), CompileError> {
        let return_type_name =
            function
                .return_type
                .as_deref()
                .ok_or_else(|| CompileError::MissingType {
                    name: full_name.to_string(),
                })?;
        let return_type = self.types.resolve_return(return_type_name)?;

        let mut doc = self.doc(function);
        let mut parameters = Vec::new();
        let mut body = Vec::new();
        for child in &function.children {
            check_identifier(child, project_of(full_name))?;
            let child_name = join_name(full_name, &child.name);
            match child.kind {
                ItemKind::Parameter => {
                    let java_type = self.types.resolve_item(self.index.resolve(&child_name)?)?;
                    parameters.push(JavaParameter {
                        java_type,
                        name: child.name.clone(),
                    });
                    if self.options.include_comments && !child.comments.trim().is_empty() {
                        doc.push(format!(
                            "@param {} {}",
                            child.name,
                            comment_lines(&child.comments).join(" ")
                        ));
                    }
                }
                ItemKind::Variable => {
                    let java_type = self.types.resolve_item(self.index.resolve(&child_name)?)?;
                    body.push(JavaStmt::LocalVariable {
                        initializer: default_value(&java_type)?,
                        java_type,
                        name: child.name.clone(),
                    });
                }
                other => {
                    return Err(CompileError::InvalidItem {
                        name: child_name,
                        message: format!("a FUNCTION cannot contain a {}", other),
                    });
                }
            }
        }

        let compiled = compile_function_body(self.index, full_name)?;
        body.extend(compiled.statements);

        let modifiers = if is_static {
            vec![Modifier::Public, Modifier::Static]
        } else {
            vec![Modifier::Public]
        };
        let method = JavaMethod {
            doc,
            modifiers,
            return_type,
            name: function.name.clone(),
            parameters,
            body,
        };
        Ok((method, compiled.reads_input))
    }

    fn doc(&self, item: &Item) -> Vec<String> {
        if self.options.include_comments {
            comment_lines(&item.comments)
        } else {
            Vec::new()
        }
    }
}

use super::expression::JavaExpr;
use super::statement::{JavaStmt, fmt_block, indent};
use super::types::JavaType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Private,
    Static,
    Final,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
        };
        f.write_str(keyword)
    }
}

fn write_modifiers(f: &mut fmt::Formatter<'_>, modifiers: &[Modifier]) -> fmt::Result {
    for modifier in modifiers {
        write!(f, "{} ", modifier)?;
    }
    Ok(())
}

/// Writes a Javadoc block. Nothing is written for an empty doc.
fn write_doc(f: &mut fmt::Formatter<'_>, doc: &[String], depth: usize) -> fmt::Result {
    if doc.is_empty() {
        return Ok(());
    }
    indent(f, depth)?;
    writeln!(f, "/**")?;
    for line in doc {
        indent(f, depth)?;
        if line.is_empty() {
            writeln!(f, " *")?;
        } else {
            writeln!(f, " * {}", line)?;
        }
    }
    indent(f, depth)?;
    writeln!(f, " */")
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaField {
    pub doc: Vec<String>,
    pub modifiers: Vec<Modifier>,
    pub java_type: JavaType,
    pub name: String,
    pub initializer: JavaExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaParameter {
    pub java_type: JavaType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaMethod {
    pub doc: Vec<String>,
    pub modifiers: Vec<Modifier>,
    pub return_type: JavaType,
    pub name: String,
    pub parameters: Vec<JavaParameter>,
    pub body: Vec<JavaStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaClass {
    pub doc: Vec<String>,
    pub name: String,
    pub fields: Vec<JavaField>,
    pub methods: Vec<JavaMethod>,
}

/// One compilation unit: a package declaration and a single public class.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaFile {
    pub package: String,
    pub class: JavaClass,
}

impl JavaField {
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_doc(f, &self.doc, depth)?;
        indent(f, depth)?;
        write_modifiers(f, &self.modifiers)?;
        writeln!(f, "{} {} = {};", self.java_type, self.name, self.initializer)
    }
}

impl JavaMethod {
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_doc(f, &self.doc, depth)?;
        indent(f, depth)?;
        write_modifiers(f, &self.modifiers)?;
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", parameter.java_type, parameter.name)?;
        }
        writeln!(f, ") {{")?;
        fmt_block(f, &self.body, depth + 1)?;
        indent(f, depth)?;
        writeln!(f, "}}")
    }
}

impl fmt::Display for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_doc(f, &self.doc, 0)?;
        writeln!(f, "public class {} {{", self.name)?;
        for field in &self.fields {
            field.fmt_at(f, 1)?;
        }
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 || !self.fields.is_empty() {
                writeln!(f)?;
            }
            method.fmt_at(f, 1)?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package {};", self.package)?;
        writeln!(f)?;
        write!(f, "{}", self.class)
    }
}

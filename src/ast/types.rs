use std::fmt;

/// A Java type as it appears in generated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Double,
    Boolean,
    String,
    Void,
    /// A reference type, rendered by its fully qualified name.
    Class(String),
    Array(Box<JavaType>),
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Double => f.write_str("double"),
            JavaType::Boolean => f.write_str("boolean"),
            JavaType::String => f.write_str("String"),
            JavaType::Void => f.write_str("void"),
            JavaType::Class(name) => f.write_str(name),
            JavaType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

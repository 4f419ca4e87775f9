use crate::project::{BlockKind, ItemKind, StatementKind, ValueType};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while compiling a project into Java declarations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Function '{function}' has no START block")]
    MissingStartBlock { function: String },

    #[error("Function '{function}' has {count} START blocks, but exactly one is allowed")]
    MultipleStartBlocks { function: String, count: usize },

    #[error("{kind} block '{block_id}' has no next block")]
    MissingSuccessor { block_id: Uuid, kind: BlockKind },

    #[error(
        "{kind} block '{block_id}' has {count} outgoing connections, but exactly one is allowed"
    )]
    AmbiguousSuccessor {
        block_id: Uuid,
        kind: BlockKind,
        count: usize,
    },

    #[error(
        "Block '{missing_block_id}' not found, which is required by a connection from block '{source_block_id}'"
    )]
    BlockNotFound {
        missing_block_id: Uuid,
        source_block_id: Uuid,
    },

    #[error("DECISION block '{0}' has neither a true nor a false branch")]
    DecisionWithoutBranches(Uuid),

    #[error(
        "DECISION block '{block_id}' in function '{function}' has only one branch, \
         but a function returning {return_type} must end every path in a value"
    )]
    IncompleteDecision {
        block_id: Uuid,
        function: String,
        return_type: String,
    },

    #[error("{kind} block '{block_id}' has no statement")]
    MissingStatement { block_id: Uuid, kind: BlockKind },

    #[error("{kind} block '{block_id}' has no target variable")]
    MissingVariable { block_id: Uuid, kind: BlockKind },

    #[error("Block '{block_id}' is reachable from itself, loops cannot be compiled")]
    CycleDetected { block_id: Uuid },

    #[error("Invalid statement in block '{block_id}': {source}")]
    Statement {
        block_id: Uuid,
        source: Box<CompileError>,
    },

    #[error("Name '{name}' does not resolve to any item")]
    UnresolvedName { name: String },

    #[error("Type '{name}' is neither NUMBER, BOOLEAN, TEXT nor a declared class")]
    UnresolvedType { name: String },

    #[error("Name '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("Block id '{0}' is used more than once")]
    DuplicateBlock(Uuid),

    #[error("'{name}' is a {kind} and cannot be called")]
    NotCallable { name: String, kind: ItemKind },

    #[error("'{name}' is a {kind} and cannot be assigned to")]
    NotAssignable { name: String, kind: ItemKind },

    #[error("CALL statement has no call steps")]
    EmptyCall,

    #[error("Operator '{operator}' requires {expected} operands, but received {found}")]
    Arity {
        operator: &'static str,
        expected: String,
        found: usize,
    },

    #[error(
        "Operator '{operator}' expects {expected} operands, but operand {position} is {found}"
    )]
    OperandType {
        operator: &'static str,
        position: usize,
        expected: ValueType,
        found: ValueType,
    },

    #[error("{kind} literal is invalid: {message}")]
    InvalidLiteral { kind: StatementKind, message: String },

    #[error("INPUT block '{block_id}' reads into a variable of type '{type_name}', only NUMBER, BOOLEAN and TEXT can be read")]
    UnsupportedInputType { block_id: Uuid, type_name: String },

    #[error("Item '{name}' has no declared type")]
    MissingType { name: String },

    #[error("Type '{java_type}' has no default value")]
    NoDefaultValue { java_type: String },

    #[error("END block '{block_id}' returns a value from VOID function '{function}'")]
    UnexpectedReturnValue { block_id: Uuid, function: String },

    #[error("END block '{block_id}' returns no value, but function '{function}' returns {return_type}")]
    MissingReturnValue {
        block_id: Uuid,
        function: String,
        return_type: String,
    },

    #[error("Item '{name}' is invalid: {message}")]
    InvalidItem { name: String, message: String },

    #[error("'{name}' is not a valid Java identifier")]
    InvalidIdentifier { name: String },

    #[error("'{name}' is reserved by the generated Java code")]
    ReservedName { name: String },

    #[error("'{name}' would hide project '{project}' in qualified references")]
    ShadowsProject { name: String, project: String },

    #[error("Entry function '{0}' not found")]
    EntryFunctionNotFound(String),

    #[error(
        "Entry function '{function}' expects parameters ({}), but received ({})",
        .expected.join(", "),
        .actual.join(", ")
    )]
    EntryParameterMismatch {
        function: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Value '{value}' for entry parameter '{parameter}' is invalid: {message}")]
    InvalidEntryArgument {
        parameter: String,
        value: String,
        message: String,
    },

    #[error("Failed to compile '{item}': {source}")]
    Declaration {
        item: String,
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Wraps the error with the id of the block whose statement failed.
    pub fn in_block(self, block_id: Uuid) -> Self {
        CompileError::Statement {
            block_id,
            source: Box::new(self),
        }
    }

    /// Wraps the error with the full name of the declaration that failed.
    pub fn in_declaration(self, item: &str) -> Self {
        CompileError::Declaration {
            item: item.to_string(),
            source: Box::new(self),
        }
    }

    /// Strips the `Statement` and `Declaration` context wrappers.
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::Statement { source, .. } | CompileError::Declaration { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// Errors that can occur while writing a generated project to disk.
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Errors that can occur while loading a project file.
#[derive(Error, Debug, Clone)]
pub enum ProjectLoadError {
    #[error("Failed to read project file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse project JSON: {0}")]
    JsonParseError(String),

    #[error(transparent)]
    Conversion(#[from] ProjectConversionError),
}

/// Errors that can occur when converting a custom user format into a `blockflow` project.
#[derive(Error, Debug, Clone)]
pub enum ProjectConversionError {
    #[error("Invalid project data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while handing generated sources to `javac`.
#[derive(Error, Debug, Clone)]
pub enum ToolchainError {
    #[error("No javac found in JAVA_HOME or on PATH")]
    NotFound,

    #[error("Failed to launch '{path}': {message}")]
    Launch { path: String, message: String },

    #[error("javac failed ({status}):\n{stderr}")]
    Failed { status: String, stderr: String },
}

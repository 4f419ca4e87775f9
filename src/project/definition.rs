use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// The kind of a node in the declaration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Project,
    Package,
    Class,
    Function,
    Variable,
    Parameter,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Project => "PROJECT",
            ItemKind::Package => "PACKAGE",
            ItemKind::Class => "CLASS",
            ItemKind::Function => "FUNCTION",
            ItemKind::Variable => "VARIABLE",
            ItemKind::Parameter => "PARAMETER",
        };
        f.write_str(name)
    }
}

/// The kind of a block in a function's flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    Start,
    End,
    Decision,
    Call,
    Assignment,
    Input,
    Output,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Start => "START",
            BlockKind::End => "END",
            BlockKind::Decision => "DECISION",
            BlockKind::Call => "CALL",
            BlockKind::Assignment => "ASSIGNMENT",
            BlockKind::Input => "INPUT",
            BlockKind::Output => "OUTPUT",
        };
        f.write_str(name)
    }
}

/// The side of a block a connection leaves from or arrives at.
///
/// For DECISION blocks `Right` carries the true branch and `Left` the false branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// The statically known type of a statement's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    Boolean,
    Text,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "NUMBER",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Text => "TEXT",
            ValueType::Object => "OBJECT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementKind {
    Number,
    Boolean,
    Text,
    Object,
    Add,
    And,
    Concat,
    Divide,
    Equals,
    #[serde(alias = "GREATEROREQUALTHAN")]
    GreaterOrEqualThan,
    #[serde(alias = "GREATERTHAN")]
    GreaterThan,
    Length,
    #[serde(alias = "LESSOREQUALTHAN")]
    LessOrEqualThan,
    #[serde(alias = "LESSTHAN")]
    LessThan,
    Modulo,
    Multiply,
    #[serde(alias = "NOTEQUALS")]
    NotEquals,
    Not,
    Or,
    Subtract,
    Call,
}

impl StatementKind {
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            StatementKind::Number
                | StatementKind::Boolean
                | StatementKind::Text
                | StatementKind::Object
        )
    }

    /// The type a statement of this kind evaluates to. `None` for calls, whose
    /// type depends on the resolved target.
    pub fn value_type(self) -> Option<ValueType> {
        use StatementKind::*;
        match self {
            Number | Add | Subtract | Multiply | Divide | Modulo | Length => {
                Some(ValueType::Number)
            }
            Boolean | And | Or | Not | Equals | NotEquals | GreaterThan | LessThan
            | GreaterOrEqualThan | LessOrEqualThan => Some(ValueType::Boolean),
            Text | Concat => Some(ValueType::Text),
            Object => Some(ValueType::Object),
            Call => None,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StatementKind::*;
        let name = match self {
            Number => "NUMBER",
            Boolean => "BOOLEAN",
            Text => "TEXT",
            Object => "OBJECT",
            Add => "ADD",
            And => "AND",
            Concat => "CONCAT",
            Divide => "DIVIDE",
            Equals => "EQUALS",
            GreaterOrEqualThan => "GREATER_OR_EQUAL_THAN",
            GreaterThan => "GREATER_THAN",
            Length => "LENGTH",
            LessOrEqualThan => "LESS_OR_EQUAL_THAN",
            LessThan => "LESS_THAN",
            Modulo => "MODULO",
            Multiply => "MULTIPLY",
            NotEquals => "NOT_EQUALS",
            Not => "NOT",
            Or => "OR",
            Subtract => "SUBTRACT",
            Call => "CALL",
        };
        f.write_str(name)
    }
}

/// A typed expression tree: a literal, an operator over operands, or a call chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Literal payload. For OBJECT statements this is the type name.
    pub value: Option<serde_json::Value>,
    pub operands: Vec<Statement>,
    pub calls: Vec<Call>,
}

impl Statement {
    fn literal(kind: StatementKind, value: serde_json::Value) -> Self {
        Self {
            kind,
            value: Some(value),
            operands: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn number(value: f64) -> Self {
        Self::literal(StatementKind::Number, serde_json::json!(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(StatementKind::Boolean, serde_json::Value::Bool(value))
    }

    pub fn text(value: &str) -> Self {
        Self::literal(StatementKind::Text, serde_json::Value::String(value.to_string()))
    }

    pub fn object(type_name: &str) -> Self {
        Self::literal(
            StatementKind::Object,
            serde_json::Value::String(type_name.to_string()),
        )
    }

    pub fn operation(kind: StatementKind, operands: Vec<Statement>) -> Self {
        Self {
            kind,
            value: None,
            operands,
            calls: Vec::new(),
        }
    }

    pub fn call(calls: Vec<Call>) -> Self {
        Self {
            kind: StatementKind::Call,
            value: None,
            operands: Vec::new(),
            calls,
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.kind.value_type()
    }
}

/// One step of a call chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Full dotted name of a variable, parameter or function.
    pub target: String,
    pub arguments: Vec<Statement>,
}

impl Call {
    pub fn new(target: &str, arguments: Vec<Statement>) -> Self {
        Self {
            target: target.to_string(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockContent {
    pub statement: Option<Statement>,
    /// Full dotted name of the variable an ASSIGNMENT or INPUT block writes to.
    pub variable: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub target: Uuid,
    pub target_side: Side,
}

/// A single node of a function's flow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Uuid,
    pub kind: BlockKind,
    pub content: Option<BlockContent>,
    pub connections: BTreeMap<Side, Vec<Connection>>,
}

impl Block {
    pub fn new(id: Uuid, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            content: None,
            connections: BTreeMap::new(),
        }
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.content.get_or_insert_with(BlockContent::default).statement = Some(statement);
        self
    }

    pub fn with_variable(mut self, variable: &str) -> Self {
        self.content.get_or_insert_with(BlockContent::default).variable =
            Some(variable.to_string());
        self
    }

    /// Adds an outgoing connection from `side` to the TOP of `target`.
    pub fn connect(mut self, side: Side, target: Uuid) -> Self {
        self.connections.entry(side).or_default().push(Connection {
            target,
            target_side: Side::Top,
        });
        self
    }

    pub fn statement(&self) -> Option<&Statement> {
        self.content.as_ref().and_then(|c| c.statement.as_ref())
    }

    pub fn variable(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.variable.as_deref())
    }

    /// All outgoing connections, ordered by side.
    pub fn successors(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values().flatten()
    }

    pub fn branch(&self, side: Side) -> &[Connection] {
        self.connections.get(&side).map(Vec::as_slice).unwrap_or_default()
    }
}

/// A node in the declaration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// Required for projects, used as the identity marker of the output directory.
    pub id: Option<Uuid>,
    pub comments: String,
    pub children: Vec<Item>,
    /// Value type of variables and parameters.
    pub type_name: Option<String>,
    /// Return type of functions, `VOID` allowed.
    pub return_type: Option<String>,
    pub blocks: Vec<Block>,
}

impl Item {
    pub fn new(name: &str, kind: ItemKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            id: None,
            comments: String::new(),
            children: Vec::new(),
            type_name: None,
            return_type: None,
            blocks: Vec::new(),
        }
    }

    pub fn project(name: &str, id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, ItemKind::Project)
        }
    }

    pub fn package(name: &str) -> Self {
        Self::new(name, ItemKind::Package)
    }

    pub fn class(name: &str) -> Self {
        Self::new(name, ItemKind::Class)
    }

    pub fn function(name: &str, return_type: &str) -> Self {
        Self {
            return_type: Some(return_type.to_string()),
            ..Self::new(name, ItemKind::Function)
        }
    }

    pub fn variable(name: &str, type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            ..Self::new(name, ItemKind::Variable)
        }
    }

    pub fn parameter(name: &str, type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            ..Self::new(name, ItemKind::Parameter)
        }
    }

    pub fn with_child(mut self, child: Item) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Item>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    pub fn with_comments(mut self, comments: &str) -> Self {
        self.comments = comments.to_string();
        self
    }

    pub fn children_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Item> {
        self.children.iter().filter(move |child| child.kind == kind)
    }
}

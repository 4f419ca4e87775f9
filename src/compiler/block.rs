use super::expression::ExpressionCompiler;
use super::types::{TypeResolver, default_value, input_method, qualified_reference};
use crate::ast::{JavaExpr, JavaStmt, JavaType};
use crate::error::CompileError;
use crate::index::{IndexedItem, ResolutionIndex};
use crate::project::{Block, BlockKind, Connection, ItemKind, Side, Statement};
use tracing::debug;
use uuid::Uuid;

/// The compiled body of one function.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBody {
    pub statements: Vec<JavaStmt>,
    /// Whether any INPUT block was compiled, so the hosting class needs a scanner.
    pub reads_input: bool,
}

/// Compiles the flow graph of the function named `function` into Java statements.
pub fn compile_function_body<'a>(
    index: &'a ResolutionIndex<'a>,
    function: &str,
) -> Result<CompiledBody, CompileError> {
    let entry = index.resolve(function)?;
    if entry.kind() != ItemKind::Function {
        return Err(CompileError::InvalidItem {
            name: function.to_string(),
            message: format!("a {} has no flow graph", entry.kind()),
        });
    }

    let return_type_name =
        entry
            .item
            .return_type
            .as_deref()
            .ok_or_else(|| CompileError::MissingType {
                name: entry.full_name.clone(),
            })?;
    let return_type = TypeResolver::new(index).resolve_return(return_type_name)?;

    let mut compiler = BlockCompiler::new(index, entry, return_type);
    let start = compiler.find_start()?;
    let statements = compiler.compile_from(start)?;
    debug!(
        function = %entry.full_name,
        statements = statements.len(),
        reads_input = compiler.reads_input,
        "compiled function body"
    );

    Ok(CompiledBody {
        statements,
        reads_input: compiler.reads_input,
    })
}

/// Walks a function's blocks from START, turning each path into nested statements.
struct BlockCompiler<'a> {
    index: &'a ResolutionIndex<'a>,
    function: &'a IndexedItem<'a>,
    return_type: JavaType,
    expressions: ExpressionCompiler<'a>,
    types: TypeResolver<'a>,
    /// Blocks on the current recursion path, used to reject loops.
    path: Vec<Uuid>,
    reads_input: bool,
}

impl<'a> BlockCompiler<'a> {
    fn new(
        index: &'a ResolutionIndex<'a>,
        function: &'a IndexedItem<'a>,
        return_type: JavaType,
    ) -> Self {
        Self {
            index,
            function,
            return_type,
            expressions: ExpressionCompiler::new(index),
            types: TypeResolver::new(index),
            path: Vec::new(),
            reads_input: false,
        }
    }

    fn find_start(&self) -> Result<&'a Block, CompileError> {
        let mut starts = self
            .function
            .item
            .blocks
            .iter()
            .filter(|block| block.kind == BlockKind::Start);

        match (starts.next(), starts.count()) {
            (Some(start), 0) => Ok(start),
            (None, _) => Err(CompileError::MissingStartBlock {
                function: self.function.full_name.clone(),
            }),
            (Some(_), others) => Err(CompileError::MultipleStartBlocks {
                function: self.function.full_name.clone(),
                count: others + 1,
            }),
        }
    }

    fn compile_from(&mut self, block: &'a Block) -> Result<Vec<JavaStmt>, CompileError> {
        if self.path.contains(&block.id) {
            return Err(CompileError::CycleDetected { block_id: block.id });
        }

        self.path.push(block.id);
        let result = self.compile_block(block);
        self.path.pop();
        result
    }

    fn compile_block(&mut self, block: &'a Block) -> Result<Vec<JavaStmt>, CompileError> {
        match block.kind {
            BlockKind::Start => {
                let next = self.next_block(block)?;
                self.compile_from(next)
            }
            BlockKind::End => self.compile_end(block),
            BlockKind::Decision => self.compile_decision(block),
            BlockKind::Call => {
                let call = self.expression(block, self.statement_of(block)?)?;
                self.continue_after(block, JavaStmt::Expression(call))
            }
            BlockKind::Assignment => {
                let target = self.assignable(block)?;
                let value = self.expression(block, self.statement_of(block)?)?;
                let assign = JavaStmt::Assign {
                    target: self.assignment_target(target, &value),
                    value,
                };
                self.continue_after(block, assign)
            }
            BlockKind::Input => {
                let read = self.compile_input(block)?;
                self.continue_after(block, read)
            }
            BlockKind::Output => {
                let value = self.expression(block, self.statement_of(block)?)?;
                self.continue_after(block, JavaStmt::Print(value))
            }
        }
    }

    fn compile_end(&self, block: &'a Block) -> Result<Vec<JavaStmt>, CompileError> {
        let returns_void = self.return_type == JavaType::Void;
        match block.statement() {
            Some(_) if returns_void => Err(CompileError::UnexpectedReturnValue {
                block_id: block.id,
                function: self.function.full_name.clone(),
            }),
            None if !returns_void => Err(CompileError::MissingReturnValue {
                block_id: block.id,
                function: self.function.full_name.clone(),
                return_type: self.return_type.to_string(),
            }),
            Some(statement) => {
                let value = self.expression(block, statement)?;
                Ok(vec![JavaStmt::Return(Some(value))])
            }
            None => Ok(vec![JavaStmt::Return(None)]),
        }
    }

    fn compile_decision(&mut self, block: &'a Block) -> Result<Vec<JavaStmt>, CompileError> {
        let condition = self.expression(block, self.statement_of(block)?)?;
        let when_true = self.branch(block, Side::Right)?;
        let when_false = self.branch(block, Side::Left)?;
        if when_true.is_none() && when_false.is_none() {
            return Err(CompileError::DecisionWithoutBranches(block.id));
        }
        // An open branch falls off the end of the method, which javac rejects for non-void methods.
        if self.return_type != JavaType::Void && (when_true.is_none() || when_false.is_none()) {
            return Err(CompileError::IncompleteDecision {
                block_id: block.id,
                function: self.function.full_name.clone(),
                return_type: self.return_type.to_string(),
            });
        }

        let then_branch = match when_true {
            Some(next) => self.compile_from(next)?,
            None => Vec::new(),
        };
        let else_branch = match when_false {
            Some(next) => Some(self.compile_from(next)?),
            None => None,
        };

        Ok(vec![JavaStmt::If {
            condition,
            then_branch,
            else_branch,
        }])
    }

    fn compile_input(&mut self, block: &'a Block) -> Result<JavaStmt, CompileError> {
        let target = self.assignable(block)?;
        let java_type = self.types.resolve_item(target)?;
        let method = input_method(&java_type).ok_or_else(|| CompileError::UnsupportedInputType {
            block_id: block.id,
            type_name: target.item.type_name.clone().unwrap_or_default(),
        })?;
        let fallback = default_value(&java_type)?;
        self.reads_input = true;

        Ok(JavaStmt::ReadInput {
            target: JavaExpr::Name(qualified_reference(target)),
            method,
            fallback,
        })
    }

    /// Emits `head` followed by everything reachable from the block's successor.
    fn continue_after(
        &mut self,
        block: &'a Block,
        head: JavaStmt,
    ) -> Result<Vec<JavaStmt>, CompileError> {
        let next = self.next_block(block)?;
        let mut statements = vec![head];
        statements.extend(self.compile_from(next)?);
        Ok(statements)
    }

    fn expression(&self, block: &Block, statement: &Statement) -> Result<JavaExpr, CompileError> {
        self.expressions
            .compile(statement)
            .map_err(|e| e.in_block(block.id))
    }

    fn statement_of<'b>(&self, block: &'b Block) -> Result<&'b Statement, CompileError> {
        block.statement().ok_or(CompileError::MissingStatement {
            block_id: block.id,
            kind: block.kind,
        })
    }

    /// Resolves the variable an ASSIGNMENT or INPUT block writes to.
    fn assignable(&self, block: &Block) -> Result<&'a IndexedItem<'a>, CompileError> {
        let name = block.variable().ok_or(CompileError::MissingVariable {
            block_id: block.id,
            kind: block.kind,
        })?;
        let entry = self.index.resolve(name)?;
        match entry.kind() {
            ItemKind::Variable | ItemKind::Parameter => Ok(entry),
            kind => Err(CompileError::NotAssignable {
                name: name.to_string(),
                kind,
            }),
        }
    }

    /// The left-hand side of an ASSIGNMENT. A field of the method's own class is
    /// written through `this` when a parameter or local of the same name hides it,
    /// or when the value is spelled exactly like the field.
    fn assignment_target(&self, target: &IndexedItem<'_>, value: &JavaExpr) -> JavaExpr {
        let name = qualified_reference(target);
        let own_field = target.parent_kind == Some(ItemKind::Class)
            && self.function.parent_kind == Some(ItemKind::Class)
            && parent_name(&target.full_name) == parent_name(&self.function.full_name);
        if !own_field {
            return JavaExpr::Name(name);
        }

        let hidden = self
            .function
            .item
            .children
            .iter()
            .any(|child| child.name == target.item.name);
        if hidden || value.to_string() == name {
            JavaExpr::Name(format!("this.{}", name))
        } else {
            JavaExpr::Name(name)
        }
    }

    /// The single successor of a non-decision block, across all sides.
    fn next_block(&self, block: &Block) -> Result<&'a Block, CompileError> {
        let successors: Vec<&Connection> = block.successors().collect();
        match successors.as_slice() {
            [] => Err(CompileError::MissingSuccessor {
                block_id: block.id,
                kind: block.kind,
            }),
            [connection] => self.find_block(&connection.target, &block.id),
            _ => Err(CompileError::AmbiguousSuccessor {
                block_id: block.id,
                kind: block.kind,
                count: successors.len(),
            }),
        }
    }

    /// The destination of one decision branch, if the branch is connected.
    fn branch(&self, block: &Block, side: Side) -> Result<Option<&'a Block>, CompileError> {
        match block.branch(side) {
            [] => Ok(None),
            [connection] => self.find_block(&connection.target, &block.id).map(Some),
            connections => Err(CompileError::AmbiguousSuccessor {
                block_id: block.id,
                kind: block.kind,
                count: connections.len(),
            }),
        }
    }

    /// Looks up a block of the function being compiled.
    fn find_block(&self, block_id: &Uuid, source_block_id: &Uuid) -> Result<&'a Block, CompileError> {
        self.index
            .block(block_id)
            .filter(|entry| entry.function == self.function.full_name)
            .map(|entry| entry.block)
            .ok_or(CompileError::BlockNotFound {
                missing_block_id: *block_id,
                source_block_id: *source_block_id,
            })
    }
}

fn parent_name(full_name: &str) -> &str {
    full_name.rsplit_once('.').map_or("", |(parent, _)| parent)
}

//! Common test utilities for building projects and flow graphs.
use blockflow::ast::DisplayBody;
use blockflow::compiler::{ExpressionCompiler, compile_function_body};
use blockflow::index::ResolutionIndex;
use blockflow::prelude::*;
use uuid::Uuid;

#[allow(dead_code)]
pub const PROJECT_ID: Uuid = Uuid::from_u128(0x6f1c2a34_8d5e_4b7a_9c01_2e3f4a5b6c7d);

#[allow(dead_code)]
pub fn block_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// A CALL statement reading a single variable or parameter.
#[allow(dead_code)]
pub fn reference(name: &str) -> Statement {
    Statement::call(vec![Call::new(name, vec![])])
}

/// Wraps items into project `Demo` with a single package `app`.
#[allow(dead_code)]
pub fn project_with(items: Vec<Item>) -> Item {
    Item::project("Demo", PROJECT_ID).with_child(Item::package("app").with_children(items))
}

/// Puts `middle` between a START block (id 1) and an END block (id 999) and
/// connects every block to the next one through its BOTTOM side.
#[allow(dead_code)]
pub fn linear_flow(middle: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![Block::new(block_id(1), BlockKind::Start)];
    blocks.extend(middle);
    blocks.push(Block::new(block_id(999), BlockKind::End));
    for i in 0..blocks.len() - 1 {
        let next = blocks[i + 1].id;
        blocks[i] = blocks[i].clone().connect(Side::Bottom, next);
    }
    blocks
}

/// `Demo.app.run`: a VOID function with a NUMBER local `x` and a TEXT local `label`.
#[allow(dead_code)]
pub fn run_function(blocks: Vec<Block>) -> Item {
    Item::function("run", "VOID")
        .with_child(Item::variable("x", "NUMBER"))
        .with_child(Item::variable("label", "TEXT"))
        .with_blocks(blocks)
}

/// Compiles the body of `function` and renders it at indentation depth zero.
#[allow(dead_code)]
pub fn compile_body(project: &Item, function: &str) -> std::result::Result<String, CompileError> {
    let index = ResolutionIndex::build(project)?;
    let body = compile_function_body(&index, function)?;
    Ok(DisplayBody(&body.statements).to_string())
}

/// Compiles a single statement in the context of `project`.
#[allow(dead_code)]
pub fn compile_expression(project: &Item, statement: &Statement) -> std::result::Result<String, CompileError> {
    let index = ResolutionIndex::build(project)?;
    ExpressionCompiler::new(&index)
        .compile(statement)
        .map(|expr| expr.to_string())
}

/// A project with one of every declaration unit.
///
/// - `Demo.app.counter`: package-level NUMBER variable.
/// - `Demo.app.Point`: class with field `x` and method `norm` returning `x * x`.
/// - `Demo.app.greet`: VOID function taking TEXT `name`, with local `times`; it sets
///   `times` to 2, adds it to the counter and prints a greeting.
#[allow(dead_code)]
pub fn sample_project() -> Item {
    let point = Item::class("Point")
        .with_comments("A point.")
        .with_child(Item::variable("x", "NUMBER"))
        .with_child(
            Item::function("norm", "NUMBER").with_blocks(vec![
                Block::new(block_id(101), BlockKind::Start).connect(Side::Bottom, block_id(102)),
                Block::new(block_id(102), BlockKind::End).with_statement(Statement::operation(
                    StatementKind::Multiply,
                    vec![reference("Demo.app.Point.x"), reference("Demo.app.Point.x")],
                )),
            ]),
        );

    let greet = Item::function("greet", "VOID")
        .with_comments("Says hello.")
        .with_child(Item::parameter("name", "TEXT").with_comments("who to greet"))
        .with_child(Item::variable("times", "NUMBER"))
        .with_blocks(vec![
            Block::new(block_id(201), BlockKind::Start).connect(Side::Bottom, block_id(202)),
            Block::new(block_id(202), BlockKind::Assignment)
                .with_variable("Demo.app.greet.times")
                .with_statement(Statement::number(2.0))
                .connect(Side::Bottom, block_id(203)),
            Block::new(block_id(203), BlockKind::Assignment)
                .with_variable("Demo.app.counter")
                .with_statement(Statement::operation(
                    StatementKind::Add,
                    vec![reference("Demo.app.counter"), reference("Demo.app.greet.times")],
                ))
                .connect(Side::Bottom, block_id(204)),
            Block::new(block_id(204), BlockKind::Output)
                .with_statement(Statement::operation(
                    StatementKind::Concat,
                    vec![Statement::text("Hello "), reference("Demo.app.greet.name")],
                ))
                .connect(Side::Bottom, block_id(205)),
            Block::new(block_id(205), BlockKind::End),
        ]);

    Item::project("Demo", PROJECT_ID)
        .with_comments("Demo project")
        .with_child(Item::package("app").with_children(vec![
            Item::variable("counter", "NUMBER"),
            point,
            greet,
        ]))
}

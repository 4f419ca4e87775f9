//! Tests for turning flow graphs into structured Java statements.
mod common;
use blockflow::compiler::compile_function_body;
use blockflow::index::ResolutionIndex;
use blockflow::prelude::*;
use common::*;

const RUN: &str = "Demo.app.run";

fn positive_x() -> Statement {
    Statement::operation(
        StatementKind::GreaterThan,
        vec![reference("Demo.app.run.x"), Statement::number(0.0)],
    )
}

fn print(id: u128, text: &str) -> Block {
    Block::new(block_id(id), BlockKind::Output).with_statement(Statement::text(text))
}

#[test]
fn test_linear_flow() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Assignment)
            .with_variable("Demo.app.run.x")
            .with_statement(Statement::number(5.0)),
        Block::new(block_id(3), BlockKind::Output).with_statement(reference("Demo.app.run.x")),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN).unwrap(),
        "x = 5.0;\nSystem.out.println(x);\nreturn;\n"
    );
}

#[test]
fn test_assignment_of_a_sum() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Assignment)
            .with_variable("Demo.app.run.x")
            .with_statement(Statement::operation(
                StatementKind::Add,
                vec![Statement::number(3.0), Statement::number(4.0)],
            )),
        Block::new(block_id(3), BlockKind::Output).with_statement(reference("Demo.app.run.x")),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN).unwrap(),
        "x = (3.0 + 4.0);\nSystem.out.println(x);\nreturn;\n"
    );
}

#[test]
fn test_start_directly_to_end() {
    let project = project_with(vec![run_function(linear_flow(vec![]))]);
    assert_eq!(compile_body(&project, RUN).unwrap(), "return;\n");
}

#[test]
fn test_call_block_is_an_expression_statement() {
    let blocks = linear_flow(vec![Block::new(block_id(2), BlockKind::Call).with_statement(
        Statement::call(vec![Call::new(
            "Demo.app.helper",
            vec![Statement::number(1.0)],
        )]),
    )]);
    let project = project_with(vec![
        Item::function("helper", "VOID").with_child(Item::parameter("amount", "NUMBER")),
        run_function(blocks),
    ]);

    assert_eq!(
        compile_body(&project, RUN).unwrap(),
        "Demo.app.helper.helper(1.0);\nreturn;\n"
    );
}

#[test]
fn test_decision_with_both_branches() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::Decision)
            .with_statement(positive_x())
            .connect(Side::Right, block_id(3))
            .connect(Side::Left, block_id(4)),
        print(3, "positive").connect(Side::Bottom, block_id(5)),
        print(4, "not positive").connect(Side::Bottom, block_id(5)),
        Block::new(block_id(5), BlockKind::End),
    ];
    let project = project_with(vec![run_function(blocks)]);

    let expected = "\
if ((x > 0.0)) {
    System.out.println(\"positive\");
    return;
} else {
    System.out.println(\"not positive\");
    return;
}
";
    assert_eq!(compile_body(&project, RUN).unwrap(), expected);
}

#[test]
fn test_nested_decisions_indent_per_level() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::Decision)
            .with_statement(positive_x())
            .connect(Side::Right, block_id(3))
            .connect(Side::Left, block_id(9)),
        Block::new(block_id(3), BlockKind::Decision)
            .with_statement(Statement::boolean(true))
            .connect(Side::Right, block_id(9)),
        Block::new(block_id(9), BlockKind::End),
    ];
    let project = project_with(vec![run_function(blocks)]);

    let expected = "\
if ((x > 0.0)) {
    if (true) {
        return;
    }
} else {
    return;
}
";
    assert_eq!(compile_body(&project, RUN).unwrap(), expected);
}

#[test]
fn test_decision_with_only_false_branch() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::Decision)
            .with_statement(positive_x())
            .connect(Side::Left, block_id(3)),
        Block::new(block_id(3), BlockKind::End),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN).unwrap(),
        "if ((x > 0.0)) {\n} else {\n    return;\n}\n"
    );
}

#[test]
fn test_decision_without_branches_is_rejected() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::Decision).with_statement(positive_x()),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::DecisionWithoutBranches(block_id(2)))
    );
}

/// `Demo.app.run` returning NUMBER, whose decision on `x > 0` leads RIGHT to an
/// END returning 1 and, when `with_false_branch`, LEFT to an END returning 0.
fn valued_decision(with_false_branch: bool) -> Item {
    let mut decision = Block::new(block_id(2), BlockKind::Decision)
        .with_statement(positive_x())
        .connect(Side::Right, block_id(3));
    if with_false_branch {
        decision = decision.connect(Side::Left, block_id(4));
    }
    Item::function("run", "NUMBER")
        .with_child(Item::variable("x", "NUMBER"))
        .with_blocks(vec![
            Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
            decision,
            Block::new(block_id(3), BlockKind::End).with_statement(Statement::number(1.0)),
            Block::new(block_id(4), BlockKind::End).with_statement(Statement::number(0.0)),
        ])
}

#[test]
fn test_one_sided_decision_in_valued_function_is_rejected() {
    let project = project_with(vec![valued_decision(false)]);

    let error = compile_body(&project, RUN).err().unwrap();
    assert_eq!(
        error,
        CompileError::IncompleteDecision {
            block_id: block_id(2),
            function: RUN.to_string(),
            return_type: "double".to_string()
        }
    );
    assert!(error.to_string().contains("has only one branch"));
}

#[test]
fn test_two_sided_decision_in_valued_function_returns_on_both_paths() {
    let project = project_with(vec![valued_decision(true)]);

    assert_eq!(
        compile_body(&project, RUN).unwrap(),
        "if ((x > 0.0)) {\n    return 1.0;\n} else {\n    return 0.0;\n}\n"
    );
}

#[test]
fn test_input_is_guarded() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Input).with_variable("Demo.app.run.x"),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    let expected = "\
try {
    x = STDIN.nextDouble();
} catch (Exception inputError) {
    x = 0.0;
    System.err.println(\"Entered value not correct, using 0.0 instead\");
    if (STDIN.hasNext()) {
        STDIN.next();
    }
}
return;
";
    assert_eq!(compile_body(&project, RUN).unwrap(), expected);

    let index = ResolutionIndex::build(&project).unwrap();
    assert!(compile_function_body(&index, RUN).unwrap().reads_input);
}

#[test]
fn test_text_input_reads_a_token() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Input).with_variable("Demo.app.run.label"),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    let body = compile_body(&project, RUN).unwrap();
    assert!(body.contains("label = STDIN.next();"));
    assert!(body.contains("label = \"\";"));
}

#[test]
fn test_input_into_object_is_unsupported() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Input).with_variable("Demo.app.run.shape"),
    ]);
    let project = project_with(vec![
        Item::class("Shape"),
        run_function(blocks).with_child(Item::variable("shape", "Demo.app.Shape")),
    ]);

    match compile_body(&project, RUN).err().unwrap() {
        CompileError::UnsupportedInputType {
            block_id: id,
            type_name,
        } => {
            assert_eq!(id, block_id(2));
            assert_eq!(type_name, "Demo.app.Shape");
        }
        other => panic!("Expected UnsupportedInputType error, got {:?}", other),
    }
}

#[test]
fn test_missing_start_block() {
    let project = project_with(vec![run_function(vec![Block::new(
        block_id(9),
        BlockKind::End,
    )])]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::MissingStartBlock {
            function: RUN.to_string()
        })
    );
}

#[test]
fn test_multiple_start_blocks() {
    let mut blocks = linear_flow(vec![]);
    blocks.push(Block::new(block_id(2), BlockKind::Start).connect(Side::Bottom, block_id(999)));
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::MultipleStartBlocks {
            function: RUN.to_string(),
            count: 2
        })
    );
}

#[test]
fn test_missing_successor() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        print(2, "dangling"),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::MissingSuccessor {
            block_id: block_id(2),
            kind: BlockKind::Output
        })
    );
}

#[test]
fn test_ambiguous_successor() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start)
            .connect(Side::Bottom, block_id(2))
            .connect(Side::Right, block_id(3)),
        Block::new(block_id(2), BlockKind::End),
        Block::new(block_id(3), BlockKind::End),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::AmbiguousSuccessor {
            block_id: block_id(1),
            kind: BlockKind::Start,
            count: 2
        })
    );
}

#[test]
fn test_connection_to_unknown_block() {
    let blocks = vec![Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(42))];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::BlockNotFound {
            missing_block_id: block_id(42),
            source_block_id: block_id(1)
        })
    );
}

#[test]
fn test_connection_into_another_function() {
    let other = Item::function("other", "VOID").with_blocks(vec![
        Block::new(block_id(50), BlockKind::Start).connect(Side::Bottom, block_id(51)),
        Block::new(block_id(51), BlockKind::End),
    ]);
    let blocks = vec![Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(51))];
    let project = project_with(vec![other, run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::BlockNotFound {
            missing_block_id: block_id(51),
            source_block_id: block_id(1)
        })
    );
}

#[test]
fn test_loops_are_rejected() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        print(2, "again").connect(Side::Bottom, block_id(3)),
        print(3, "and again").connect(Side::Bottom, block_id(2)),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::CycleDetected {
            block_id: block_id(2)
        })
    );
}

#[test]
fn test_duplicate_block_ids() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(1)),
        Block::new(block_id(1), BlockKind::End),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::DuplicateBlock(block_id(1)))
    );
}

#[test]
fn test_void_function_cannot_return_a_value() {
    let blocks = vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::End).with_statement(Statement::number(1.0)),
    ];
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::UnexpectedReturnValue {
            block_id: block_id(2),
            function: RUN.to_string()
        })
    );
}

#[test]
fn test_valued_function_must_return_a_value() {
    let function = Item::function("count", "NUMBER").with_blocks(linear_flow(vec![]));
    let project = project_with(vec![function]);

    assert_eq!(
        compile_body(&project, "Demo.app.count"),
        Err(CompileError::MissingReturnValue {
            block_id: block_id(999),
            function: "Demo.app.count".to_string(),
            return_type: "double".to_string()
        })
    );
}

#[test]
fn test_valued_return() {
    let function = Item::function("count", "NUMBER").with_blocks(vec![
        Block::new(block_id(1), BlockKind::Start).connect(Side::Bottom, block_id(2)),
        Block::new(block_id(2), BlockKind::End).with_statement(Statement::operation(
            StatementKind::Add,
            vec![Statement::number(1.0), Statement::number(2.0)],
        )),
    ]);
    let project = project_with(vec![function]);

    assert_eq!(
        compile_body(&project, "Demo.app.count").unwrap(),
        "return (1.0 + 2.0);\n"
    );
}

#[test]
fn test_statement_errors_carry_the_block_id() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Output).with_statement(reference("Demo.app.nothing")),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    let error = compile_body(&project, RUN).err().unwrap();
    match &error {
        CompileError::Statement { block_id: id, .. } => assert_eq!(*id, block_id(2)),
        other => panic!("Expected Statement error, got {:?}", other),
    }
    assert_eq!(
        error.root_cause(),
        &CompileError::UnresolvedName {
            name: "Demo.app.nothing".to_string()
        }
    );
}

#[test]
fn test_blocks_need_their_content() {
    let output = linear_flow(vec![Block::new(block_id(2), BlockKind::Output)]);
    let project = project_with(vec![run_function(output)]);
    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::MissingStatement {
            block_id: block_id(2),
            kind: BlockKind::Output
        })
    );

    let assignment = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Assignment).with_statement(Statement::number(1.0)),
    ]);
    let project = project_with(vec![run_function(assignment)]);
    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::MissingVariable {
            block_id: block_id(2),
            kind: BlockKind::Assignment
        })
    );
}

#[test]
fn test_functions_are_not_assignable() {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Assignment)
            .with_variable("Demo.app.run")
            .with_statement(Statement::number(1.0)),
    ]);
    let project = project_with(vec![run_function(blocks)]);

    assert_eq!(
        compile_body(&project, RUN),
        Err(CompileError::NotAssignable {
            name: RUN.to_string(),
            kind: ItemKind::Function
        })
    );
}

#[test]
fn test_only_functions_have_bodies() {
    let project = project_with(vec![Item::class("Shape")]);
    match compile_body(&project, "Demo.app.Shape").err().unwrap() {
        CompileError::InvalidItem { name, .. } => assert_eq!(name, "Demo.app.Shape"),
        other => panic!("Expected InvalidItem error, got {:?}", other),
    }
}

/// `Demo.app.Counter` with a NUMBER field `value` and a VOID method `name`
/// assigning `statement` to the field.
fn counter_with_method(method: Item, statement: Statement) -> Item {
    let blocks = linear_flow(vec![
        Block::new(block_id(2), BlockKind::Assignment)
            .with_variable("Demo.app.Counter.value")
            .with_statement(statement),
    ]);
    project_with(vec![
        Item::class("Counter")
            .with_child(Item::variable("value", "NUMBER"))
            .with_child(method.with_blocks(blocks)),
    ])
}

#[test]
fn test_hidden_field_is_assigned_through_this() {
    let project = counter_with_method(
        Item::function("set", "VOID").with_child(Item::parameter("value", "NUMBER")),
        reference("Demo.app.Counter.set.value"),
    );
    assert_eq!(
        compile_body(&project, "Demo.app.Counter.set").unwrap(),
        "this.value = value;\nreturn;\n"
    );
}

#[test]
fn test_field_assigned_to_itself_uses_this() {
    let project = counter_with_method(
        Item::function("touch", "VOID"),
        reference("Demo.app.Counter.value"),
    );
    assert_eq!(
        compile_body(&project, "Demo.app.Counter.touch").unwrap(),
        "this.value = value;\nreturn;\n"
    );
}

#[test]
fn test_visible_field_is_assigned_by_name() {
    let project = counter_with_method(
        Item::function("reset", "VOID"),
        Statement::number(0.0),
    );
    assert_eq!(
        compile_body(&project, "Demo.app.Counter.reset").unwrap(),
        "value = 0.0;\nreturn;\n"
    );
}

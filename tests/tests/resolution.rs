//! Routine resolution and hoisting.

use pretty_assertions::assert_eq;
use spire_tests::prelude::*;

#[test]
fn test_call_runs_routine_body() {
    let trace = run_script(vec![
        routine("heal", vec![cmd("potion"), cmd("rest")]),
        cmd("start"),
        call("heal"),
        call("heal"),
    ])
    .unwrap();

    assert_eq!(trace.commands, vec!["start", "potion", "rest", "potion", "rest"]);
}

#[test]
fn test_forward_reference_fails() {
    let result = analyze(vec![call("heal"), routine("heal", vec![])]);

    match result.unwrap_err() {
        SemError::UnresolvedRoutine { name, .. } => assert_eq!(name, "heal"),
        other => panic!("expected unresolved routine, got {:?}", other),
    }
}

#[test]
fn test_routine_calling_earlier_routine() {
    let trace = run_script(vec![
        routine("buff", vec![cmd("buff")]),
        routine("fight", vec![call("buff"), cmd("hit")]),
        call("fight"),
    ])
    .unwrap();

    assert_eq!(trace.commands, vec!["buff", "hit"]);
}

#[test]
fn test_routine_calling_later_routine_fails() {
    let result = analyze(vec![
        routine("fight", vec![call("buff")]),
        routine("buff", vec![cmd("buff")]),
    ]);

    assert!(matches!(
        result.unwrap_err(),
        SemError::UnresolvedRoutine { .. }
    ));
}

#[test]
fn test_same_name_resolves_to_local_routine() {
    let trace = run_script(vec![
        routine("a", vec![routine("helper", vec![cmd("from_a")]), call("helper")]),
        routine("b", vec![routine("helper", vec![cmd("from_b")]), call("helper")]),
        call("a"),
        call("b"),
    ])
    .unwrap();

    assert_eq!(trace.commands, vec!["from_a", "from_b"]);
}

#[test]
fn test_inner_routine_shadows_outer() {
    let trace = run_script(vec![
        routine("helper", vec![cmd("outer")]),
        routine(
            "main",
            vec![call("helper"), routine("helper", vec![cmd("inner")]), call("helper")],
        ),
        call("main"),
        call("helper"),
    ])
    .unwrap();

    assert_eq!(trace.commands, vec!["outer", "inner", "outer"]);
}

#[test]
fn test_recursive_routine() {
    let trace = run_script(vec![
        routine(
            "drain",
            vec![if_(
                count_at_least("sip", 3),
                vec![],
                vec![cmd("sip"), call("drain")],
            )],
        ),
        call("drain"),
    ])
    .unwrap();

    assert_eq!(trace.count("sip"), 3);
}

#[test]
fn test_routines_are_hoisted_out_of_nested_lists() {
    let program = analyze(vec![
        Stmt::list(vec![routine("inner", vec![]), cmd("a")]),
        call("inner"),
    ])
    .unwrap();

    assert_eq!(program.routines.len(), 1);
    assert_eq!(program.stmts.len(), 2);
    assert_eq!(program.stmts[0], Stmt::list(vec![cmd("a")]));
}

#[test]
fn test_selectors_collected() {
    let program = analyze(vec![
        cmd_to("cast", &["p1", "p2"]),
        cmd_to("cast", &["p1", "p2"]),
        cmd_to("pass", &["p3"]),
    ])
    .unwrap();

    assert_eq!(program.selectors.len(), 2);
    assert!(program.selectors.contains(&Selector::new(["p3"])));
}

#[test]
fn test_continued_numbering() {
    let first = analyze(vec![routine("a", vec![times(1, vec![])])]).unwrap();
    let second = Analyzer::with_starting_id(first.next_id.as_u64())
        .analyze_program(vec![routine("b", vec![])])
        .unwrap();

    let a = first.routines[0].symbol().unwrap().id();
    let b = second.routines[0].symbol().unwrap().id();
    assert!(a < b);
    assert_eq!(b, first.next_id);
}

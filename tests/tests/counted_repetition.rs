//! Counted repetition: `times n { body }`.

use pretty_assertions::assert_eq;
use spire_tests::prelude::*;

#[test]
fn test_times_zero_runs_nothing() {
    let trace = run_script(vec![times(0, vec![cmd("cast")]), cmd("done")]).unwrap();

    assert_eq!(trace.commands, vec!["done"]);
    assert_eq!(trace.kills.len(), 1);
    assert!(trace.live.is_empty());
}

#[test]
fn test_times_three_runs_three_times() {
    let trace = run_script(vec![times(3, vec![cmd("cast")])]).unwrap();

    assert_eq!(trace.count("cast"), 3);
    assert!(trace.live.is_empty());
}

#[test]
fn test_times_matches_plain_loop_counts() {
    for n in 0..6u32 {
        let trace = run_script(vec![times(n, vec![cmd("tick")])]).unwrap();
        assert_eq!(trace.count("tick"), n as usize, "times {}", n);
    }
}

#[test]
fn test_nested_times_multiply() {
    let trace = run_script(vec![times(2, vec![times(3, vec![cmd("hit")]), cmd("turn")])]).unwrap();

    assert_eq!(trace.count("hit"), 6);
    assert_eq!(trace.count("turn"), 2);
    // one inner counter per outer iteration, plus the outer counter
    assert_eq!(trace.kills.len(), 3);
    assert!(trace.live.is_empty());
}

#[test]
fn test_break_leaves_times_and_kills_counter() {
    let trace = run_script(vec![times(
        10,
        vec![
            cmd("cast"),
            if_(count_at_least("cast", 4), vec![brk()], vec![]),
        ],
    )])
    .unwrap();

    assert_eq!(trace.count("cast"), 4);
    assert!(trace.live.is_empty());
}

#[test]
fn test_times_counter_is_a_fresh_variable_each_time() {
    let program = analyze(vec![times(1, vec![]), times(1, vec![])]).unwrap();

    let counter = |stmt: &Stmt| match stmt {
        Stmt::List(list) => match &list.stmts[0] {
            Stmt::DefVar(def) => def.var.clone(),
            other => panic!("expected defvar, got {:?}", other),
        },
        other => panic!("expected list, got {:?}", other),
    };
    let first = counter(&program.stmts[0]);
    let second = counter(&program.stmts[1]);

    assert_eq!(first.literal(), second.literal());
    assert!(first.id() < second.id());
}

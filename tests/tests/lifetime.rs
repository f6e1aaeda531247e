//! Variable lifetime across returns, breaks and branches.

use pretty_assertions::assert_eq;
use spire_tests::prelude::*;

fn counters_of(trace: &Trace) -> Vec<u64> {
    trace.kills.iter().map(|id| id.as_u64()).collect()
}

#[test]
fn test_return_kills_live_counters_in_reverse_order() {
    let trace = run_script(vec![
        routine(
            "deep",
            vec![times(
                1,
                vec![times(
                    1,
                    vec![times(1, vec![if_(Expr::bool(true), vec![ret()], vec![])])],
                )],
            )],
        ),
        call("deep"),
    ])
    .unwrap();

    // routine symbol is #0, counters are #1, #2, #3
    assert_eq!(counters_of(&trace), vec![3, 2, 1]);
    assert!(trace.live.is_empty());
}

#[test]
fn test_early_return_from_counted_loop() {
    let trace = run_script(vec![
        routine(
            "attack",
            vec![times(
                5,
                vec![
                    cmd("hit"),
                    if_(count_at_least("hit", 2), vec![ret()], vec![]),
                ],
            )],
        ),
        call("attack"),
        cmd("after"),
    ])
    .unwrap();

    assert_eq!(trace.commands, vec!["hit", "hit", "after"]);
    assert!(trace.live.is_empty());
}

#[test]
fn test_return_inside_until_inside_routine() {
    let trace = run_script(vec![
        routine(
            "wait",
            vec![times(
                2,
                vec![until(
                    Expr::bool(false),
                    vec![cmd("poll"), if_(count_at_least("poll", 3), vec![ret()], vec![])],
                )],
            )],
        ),
        call("wait"),
    ])
    .unwrap();

    assert_eq!(trace.count("poll"), 3);
    assert!(trace.live.is_empty());
}

#[test]
fn test_repeated_calls_define_counter_again() {
    let trace = run_script(vec![
        routine("twice", vec![times(2, vec![cmd("cast")])]),
        call("twice"),
        call("twice"),
    ])
    .unwrap();

    assert_eq!(trace.count("cast"), 4);
    assert_eq!(trace.kills.len(), 2);
    assert!(trace.live.is_empty());
}

#[test]
fn test_return_at_top_level_fails() {
    let result = analyze(vec![cmd("cast"), ret()]);

    assert!(matches!(
        result.unwrap_err(),
        SemError::ReturnOutsideRoutine { .. }
    ));
}

#[test]
fn test_break_in_routine_without_loop_fails() {
    let result = analyze(vec![times(2, vec![routine("inner", vec![brk()])])]);

    assert!(matches!(
        result.unwrap_err(),
        SemError::BreakOutsideLoop { .. }
    ));
}

#[test]
fn test_break_in_plain_loop() {
    let trace = run_script(vec![loop_(vec![
        cmd("spin"),
        if_(count_at_least("spin", 5), vec![brk()], vec![]),
    ])])
    .unwrap();

    assert_eq!(trace.count("spin"), 5);
}

#[test]
fn test_runaway_loop_hits_step_limit() {
    let program = analyze(vec![loop_(vec![cmd("spin")])]).unwrap();

    let result = Runner::new(&program).with_step_limit(50).run();

    assert!(matches!(result, Err(RunError::StepLimit { limit: 50 })));
}

#[test]
fn test_while_with_branches() {
    let trace = run_script(vec![while_(
        Expr::not(count_at_least("tick", 4)),
        vec![
            if_(
                count_at_least("tick", 2),
                vec![cmd("late")],
                vec![cmd("early")],
            ),
            cmd("tick"),
        ],
    )])
    .unwrap();

    assert_eq!(
        trace.commands,
        vec!["early", "tick", "early", "tick", "late", "tick", "late", "tick"]
    );
}

//! Text dump of analyzed programs.

use pretty_assertions::assert_eq;
use spire_tests::prelude::*;

#[test]
fn test_program_dump() {
    let program = analyze(vec![
        routine("fight", vec![times(2, vec![cmd_to("hit", &["p1"])])]),
        until(count_at_least("hit", 4), vec![call("fight")]),
    ])
    .unwrap();

    let expected = "\
block fight#0 {
  defvar :anonymous:#1
  writevar :anonymous:#1 = 2
  while (:anonymous:#1 > 0) {
    hit() @ [p1]
    writevar :anonymous:#1 = (:anonymous:#1 - 1)
  }
  killvar :anonymous:#1
  return
}
if (count(\"hit\") >= 4) {
}
else {
  until_region :until#2 (count(\"hit\") >= 4) {
    while (not (count(\"hit\") >= 4)) {
      call fight#0
    }
  }
}";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_empty_program_dump() {
    let program = analyze(vec![]).unwrap();

    assert_eq!(program.to_string(), "");
}

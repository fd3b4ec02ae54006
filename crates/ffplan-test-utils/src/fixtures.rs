//! Hand-built tasks with known solutions.
//!
//! - [`toy_chain`]: `A -> B -> C`, the smallest task with a two-step plan.
//! - [`chain`]: the same shape with `n` steps.
//! - [`unreachable_goal`]: no action ever adds the goal fact.
//! - [`one_way_trap`]: a tempting first move leads into a dead end.
//! - [`gripper`]: the classic two-room ball transport task.

use ffplan_task::{StripsTask, TaskBuilder};

/// Facts `A`, `B`, `C`; `act1: A => B`, `act2: B => C`; initial `{A}`,
/// goal `{C}`. The only shortest plan is `[act1, act2]` and the FF
/// estimate of the initial state is 2.
pub fn toy_chain() -> StripsTask {
    let mut b = TaskBuilder::new();
    let a = b.fact("A");
    let bb = b.fact("B");
    let c = b.fact("C");
    b.action("act1", [a], [bb], []);
    b.action("act2", [bb], [c], []);
    b.initial([a]).goal([c]);
    b.build().expect("toy chain is well formed")
}

/// Facts `p0..=pn`, action `step{i}: p{i} => p{i+1}` deleting `p{i}`.
/// Initial `{p0}`, goal `{pn}`; the plan has exactly `n` steps.
pub fn chain(n: usize) -> StripsTask {
    let mut b = TaskBuilder::new();
    let facts: Vec<_> = (0..=n).map(|i| b.fact(format!("p{i}"))).collect();
    for i in 0..n {
        b.action(format!("step{i}"), [facts[i]], [facts[i + 1]], [facts[i]]);
    }
    b.initial([facts[0]]).goal([facts[n]]);
    b.build().expect("chain is well formed")
}

/// `start => mid` is the only action; the goal `prize` is never added.
pub fn unreachable_goal() -> StripsTask {
    let mut b = TaskBuilder::new();
    let start = b.fact("start");
    let mid = b.fact("mid");
    let prize = b.fact("prize");
    b.action("wander", [start], [mid], []);
    b.initial([start]).goal([prize]);
    b.build().expect("unreachable task is well formed")
}

/// `jump` (action 0) swaps `s` for `t`; `restore` swaps back and `leap`
/// needs both, which only the relaxation can have. The real route is
/// `walk`, `walk-on`, `arrive`.
///
/// `{t}` and `{m1}` both score 2, so a driver breaking ties by creation
/// order expands the dead end first.
pub fn one_way_trap() -> StripsTask {
    let mut b = TaskBuilder::new();
    let s = b.fact("s");
    let t = b.fact("t");
    let m1 = b.fact("m1");
    let m2 = b.fact("m2");
    let g = b.fact("g");
    b.action("jump", [s], [t], [s]);
    b.action("restore", [t], [s], [t]);
    b.action("leap", [s, t], [g], []);
    b.action("walk", [s], [m1], [s]);
    b.action("walk-on", [m1], [m2], [m1]);
    b.action("arrive", [m2], [g], [m2]);
    b.initial([s]).goal([g]);
    b.build().expect("trap task is well formed")
}

/// Move `balls` balls from room `a` to room `b` with a two-handed robot.
pub fn gripper(balls: usize) -> StripsTask {
    const ROOMS: [&str; 2] = ["a", "b"];
    const HANDS: [&str; 2] = ["left", "right"];

    let mut b = TaskBuilder::new();
    let robby = ROOMS.map(|r| b.fact(format!("robby-{r}")));
    let free = HANDS.map(|h| b.fact(format!("free-{h}")));

    b.action("move-a-b", [robby[0]], [robby[1]], [robby[0]]);
    b.action("move-b-a", [robby[1]], [robby[0]], [robby[1]]);

    let mut initial = vec![robby[0], free[0], free[1]];
    let mut goal = Vec::with_capacity(balls);
    for i in 0..balls {
        let at = ROOMS.map(|r| b.fact(format!("ball{i}-{r}")));
        let held = HANDS.map(|h| b.fact(format!("ball{i}-{h}")));
        for (r, room) in ROOMS.iter().enumerate() {
            for (g, hand) in HANDS.iter().enumerate() {
                b.action(
                    format!("pick-ball{i}-{room}-{hand}"),
                    [at[r], robby[r], free[g]],
                    [held[g]],
                    [at[r], free[g]],
                );
                b.action(
                    format!("drop-ball{i}-{room}-{hand}"),
                    [held[g], robby[r]],
                    [at[r], free[g]],
                    [held[g]],
                );
            }
        }
        initial.push(at[0]);
        goal.push(at[1]);
    }
    b.initial(initial).goal(goal);
    b.build().expect("gripper task is well formed")
}

//! Benchmark task profiles for ffplan.
//!
//! - [`grid_task`]: a robot walking a `width x height` grid to the far
//!   corner, picking up keys that open the last row.
//! - [`reference_profile`]: gripper with 6 balls, a few thousand states.
//! - [`stress_profile`]: gripper with 12 balls.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ffplan_task::{StripsTask, TaskBuilder};
use ffplan_test_utils::gripper;

/// Robot starts at `(0, 0)` and must reach `(width-1, height-1)`.
///
/// Entering the last row needs the key lying at `(width-1, 0)`.
pub fn grid_task(width: usize, height: usize) -> StripsTask {
    assert!(width >= 2 && height >= 2, "grid needs at least 2x2 cells");
    let mut b = TaskBuilder::new();
    let mut at = Vec::with_capacity(height);
    for y in 0..height {
        let row: Vec<_> = (0..width).map(|x| b.fact(format!("at-{x}-{y}"))).collect();
        at.push(row);
    }
    let has_key = b.fact("has-key");

    for y in 0..height {
        for x in 0..width {
            let here = at[y][x];
            let mut neighbours = Vec::with_capacity(4);
            if x > 0 {
                neighbours.push((x - 1, y));
            }
            if x + 1 < width {
                neighbours.push((x + 1, y));
            }
            if y > 0 {
                neighbours.push((x, y - 1));
            }
            if y + 1 < height {
                neighbours.push((x, y + 1));
            }
            for (nx, ny) in neighbours {
                let there = at[ny][nx];
                let name = format!("move-{x}-{y}-{nx}-{ny}");
                if ny == height - 1 && y != height - 1 {
                    b.action(name, [here, has_key], [there], [here]);
                } else {
                    b.action(name, [here], [there], [here]);
                }
            }
        }
    }
    let key_cell = at[0][width - 1];
    b.action("pick-key", [key_cell], [has_key], []);
    b.initial([at[0][0]]).goal([at[height - 1][width - 1]]);
    b.build().expect("grid task is well formed")
}

/// Medium gripper instance.
pub fn reference_profile() -> StripsTask {
    gripper(6)
}

/// Large gripper instance.
pub fn stress_profile() -> StripsTask {
    gripper(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffplan_core::{ActionId, Domain};
    use ffplan_test_utils::plan_reaches_goal;

    fn by_name(task: &StripsTask, name: &str) -> ActionId {
        (0..task.action_count() as u32)
            .map(ActionId)
            .find(|&a| task.action_name(a) == name)
            .unwrap()
    }

    #[test]
    fn grid_needs_the_key() {
        let task = grid_task(2, 2);
        let direct: Vec<_> = ["move-0-0-0-1"].iter().map(|n| by_name(&task, n)).collect();
        assert!(!plan_reaches_goal(&task, &direct));
        let via_key: Vec<_> = ["move-0-0-1-0", "pick-key", "move-1-0-1-1"]
            .iter()
            .map(|n| by_name(&task, n))
            .collect();
        assert!(plan_reaches_goal(&task, &via_key));
    }
}

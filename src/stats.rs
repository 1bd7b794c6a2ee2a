use std::fmt;

use serde::Serialize;

use crate::grid::{Grid, GroupId, Person};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub count_total: u64,
    pub count_diseased: u64,
    pub sum_strength: u64,
    pub sum_age: u64,
}

impl GroupStats {
    pub fn avg_strength(&self) -> u64 {
        self.sum_strength / self.count_total.max(1)
    }

    pub fn avg_age(&self) -> u64 {
        self.sum_age / self.count_total.max(1)
    }
}

/// Per-group population counters for one tick, rebuilt from scratch every
/// tick. Workers accumulate their own copy and the scheduler merges them
/// after the join.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickStats {
    groups: [GroupStats; GroupId::ALL.len()],
}

impl TickStats {
    pub fn record(&mut self, person: &Person) {
        let entry = &mut self.groups[person.group.index()];
        entry.count_total += 1;
        entry.sum_strength += person.strength as u64;
        entry.sum_age += person.age as u64;
        if person.disease > 0.0 {
            entry.count_diseased += 1;
        }
    }

    pub fn merge(&mut self, other: &TickStats) {
        for (entry, addition) in self.groups.iter_mut().zip(&other.groups) {
            entry.count_total += addition.count_total;
            entry.count_diseased += addition.count_diseased;
            entry.sum_strength += addition.sum_strength;
            entry.sum_age += addition.sum_age;
        }
    }

    pub fn group(&self, group: GroupId) -> &GroupStats {
        &self.groups[group.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &GroupStats)> {
        GroupId::ALL.iter().map(move |&group| (group, &self.groups[group.index()]))
    }

    pub fn total_alive(&self) -> u64 {
        self.groups.iter().map(|g| g.count_total).sum()
    }

    /// Fold the current grid contents into a fresh snapshot, independent of
    /// any tick. Arrived cells count the same as settled ones.
    pub fn census(grid: &Grid) -> TickStats {
        let mut stats = TickStats::default();
        for cell in grid.cells() {
            if let Some(person) = cell.person() {
                stats.record(person);
            }
        }
        stats
    }
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (group, stats) in self.iter() {
            writeln!(
                f,
                "{:<8} alive({}) sick({}) avg_age({}) avg_str({})",
                format!("{}:", group.name()),
                stats.count_total,
                stats.count_diseased,
                stats.avg_age(),
                stats.avg_strength(),
            )?;
        }
        Ok(())
    }
}

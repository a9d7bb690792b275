use std::collections::HashMap;

use serde::Serialize;

use crate::utils::percentage::{count_percentage, Percentage};

use super::{entities::DerivedRecord, work_mode::WorkMode};

/// Number of records per [WorkMode].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkModeSummary {
    counts: HashMap<WorkMode, usize>,
}

impl WorkModeSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DerivedRecord>) -> Self {
        let mut counts = HashMap::<WorkMode, usize>::new();
        for record in records {
            *counts.entry(record.work_mode).or_default() += 1;
        }
        Self { counts }
    }

    pub fn count(&self, mode: WorkMode) -> usize {
        self.counts.get(&mode).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Present modes in display order.
    pub fn iter(&self) -> impl Iterator<Item = (WorkMode, usize)> + '_ {
        WorkMode::ALL
            .into_iter()
            .map(|mode| (mode, self.count(mode)))
            .filter(|(_, count)| *count > 0)
    }

    /// Counts for the chartable modes, present ones only, in display order.
    pub fn chart_counts(&self) -> Vec<(WorkMode, usize)> {
        WorkMode::CHART
            .into_iter()
            .map(|mode| (mode, self.count(mode)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn share(&self, mode: WorkMode) -> Percentage {
        count_percentage(self.count(mode), self.total())
    }
}

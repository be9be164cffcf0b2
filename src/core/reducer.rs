//! Best-grade reduction
//!
//! Collapses a transcript into one record per course code, keeping the best
//! attempt. Retakes only replace an earlier attempt with a strictly higher
//! grade; ties keep the first attempt seen.

use crate::core::grades::{grade_point, is_graded};
use crate::core::models::GradeRecord;
use planner_logger::debug;
use std::collections::HashMap;

/// Best record per course code, in first-seen code order.
///
/// Records can be taken out by code; whatever is left afterwards is iterated
/// in the order the codes first appeared in the transcript.
#[derive(Debug, Clone, Default)]
pub struct BestGrades {
    slots: Vec<Option<GradeRecord>>,
    index: HashMap<String, usize>,
}

impl BestGrades {
    /// Number of records not yet taken
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True when every record has been taken
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the record for `code`, if present and not taken
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&GradeRecord> {
        self.index
            .get(code)
            .and_then(|&i| self.slots[i].as_ref())
    }

    /// Remove and return the record for `code`
    pub fn take(&mut self, code: &str) -> Option<GradeRecord> {
        let &i = self.index.get(code)?;
        self.slots[i].take()
    }

    /// Iterate over remaining records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &GradeRecord> {
        self.slots.iter().flatten()
    }

    /// Consume into the remaining records, in first-seen order
    #[must_use]
    pub fn into_remaining(self) -> Vec<GradeRecord> {
        self.slots.into_iter().flatten().collect()
    }

    fn offer(&mut self, record: &GradeRecord) {
        if let Some(&i) = self.index.get(&record.course_code) {
            let better = self.slots[i]
                .as_ref()
                .map_or(true, |kept| {
                    grade_point(&record.letter_grade) > grade_point(&kept.letter_grade)
                });
            if better {
                self.slots[i] = Some(record.clone());
            }
        } else {
            self.index.insert(record.course_code.clone(), self.slots.len());
            self.slots.push(Some(record.clone()));
        }
    }
}

/// Reduce a transcript to its best grade per course.
///
/// Records with no credits, and records carrying an administrative
/// non-grade (`MT`, `KD`, blank), are dropped before grouping.
#[must_use]
pub fn best_grades(records: &[GradeRecord]) -> BestGrades {
    let mut best = BestGrades::default();
    let mut dropped = 0usize;

    for record in records {
        if record.credit_count == 0 || !is_graded(&record.letter_grade) {
            dropped += 1;
            continue;
        }
        best.offer(record);
    }

    debug!(
        "Reduced {} records to {} courses ({dropped} skipped)",
        records.len(),
        best.len()
    );
    best
}

//! Course reconciliation
//!
//! Merges the best-grade mapping with the catalog:
//! 1. every required course appears once, real grade or fallback placeholder;
//! 2. every advanced elective appears once, the same way;
//! 3. unmatched transcript records become free electives;
//! 4. the elective pool (advanced then free) is stably ranked by grade point;
//! 5. entries past the elective cap are demoted to `F`.

use crate::core::catalog::Catalog;
use crate::core::grades::grade_point;
use crate::core::models::{CourseSet, CurriculumEntry, ReconciledCourse};
use crate::core::reducer::BestGrades;
use planner_logger::debug;

/// Number of elective courses that count toward the degree
pub const DEFAULT_ELECTIVE_CAP: usize = 8;

/// Merge one catalog list, consuming matched records from `best`
fn merge_catalog(
    entries: &[CurriculumEntry],
    best: &mut BestGrades,
    is_required: bool,
) -> Vec<ReconciledCourse> {
    entries
        .iter()
        .map(|entry| {
            best.take(&entry.course_code).map_or_else(
                || ReconciledCourse::placeholder(entry, is_required),
                |record| ReconciledCourse::from_record(record, is_required),
            )
        })
        .collect()
}

/// Rank the elective pool and demote everything past `cap` to `F`
fn rank_and_cap(mut pool: Vec<ReconciledCourse>, cap: usize) -> Vec<ReconciledCourse> {
    // sort_by is stable: equal grades keep advanced-before-free order
    pool.sort_by(|a, b| grade_point(&b.current_grade).total_cmp(&grade_point(&a.current_grade)));
    for course in pool.iter_mut().skip(cap) {
        course.demote();
    }
    pool
}

/// Build the reconciled course set from reduced grades and a catalog.
///
/// The result lists required courses in catalog order followed by the ranked
/// elective pool. At most `elective_cap` elective entries keep a non-`F` grade.
#[must_use]
pub fn reconcile(mut best: BestGrades, catalog: &Catalog, elective_cap: usize) -> CourseSet {
    let required = merge_catalog(&catalog.required_courses, &mut best, true);
    let mut pool = merge_catalog(&catalog.advanced_elective_courses, &mut best, false);

    let free: Vec<ReconciledCourse> = best
        .into_remaining()
        .into_iter()
        .map(|record| ReconciledCourse::from_record(record, false))
        .collect();
    let free_count = free.len();
    pool.extend(free);

    let demoted = pool.len().saturating_sub(elective_cap);
    let pool = rank_and_cap(pool, elective_cap);

    debug!(
        "Reconciled {} required, {} electives ({free_count} free, {demoted} past cap)",
        required.len(),
        pool.len()
    );

    let mut courses = required;
    courses.extend(pool);
    CourseSet::new(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeRecord;
    use crate::core::reducer::best_grades;

    fn small_catalog() -> Catalog {
        Catalog::new(
            vec![
                CurriculumEntry::new("R1", "Required 1", 4, "F").with_prediction("B"),
                CurriculumEntry::new("R2", "Required 2", 2, "DT"),
            ],
            vec![
                CurriculumEntry::new("E1", "Elective 1", 3, "F"),
                CurriculumEntry::new("E2", "Elective 2", 3, "F"),
            ],
        )
    }

    fn rec(code: &str, grade: &str) -> GradeRecord {
        GradeRecord::new(code, code, 3, grade)
    }

    #[test]
    fn test_required_real_and_placeholder() {
        let set = reconcile(best_grades(&[rec("R1", "A")]), &small_catalog(), DEFAULT_ELECTIVE_CAP);

        let r1 = set.get("R1").expect("R1 present");
        assert_eq!(r1.current_grade, "A");
        assert!(!r1.is_predicted);
        assert!(r1.is_required);
        assert!(r1.predicted_grade_hint.is_none());

        let r2 = set.get("R2").expect("R2 present");
        assert_eq!(r2.current_grade, "DT");
        assert_eq!(r2.original_grade, "DT");
        assert!(r2.is_predicted);
        assert!(r2.is_required);
    }

    #[test]
    fn test_order_required_then_ranked_pool() {
        let records = [rec("FREE1", "B"), rec("E2", "A"), rec("R2", "DT")];
        let set = reconcile(best_grades(&records), &small_catalog(), DEFAULT_ELECTIVE_CAP);
        let codes: Vec<_> = set.iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["R1", "R2", "E2", "FREE1", "E1"]);
    }

    #[test]
    fn test_stable_ranking_prefers_advanced_on_ties() {
        let records = [rec("FREE1", "B+"), rec("E1", "B+")];
        let set = reconcile(best_grades(&records), &small_catalog(), DEFAULT_ELECTIVE_CAP);
        let pool: Vec<_> = set.optional().map(|c| c.course_code.as_str()).collect();
        assert_eq!(pool, vec!["E1", "FREE1", "E2"]);
    }

    #[test]
    fn test_cap_demotes_excess_electives() {
        let records: Vec<_> = (0..10).map(|i| rec(&format!("FREE{i}"), "A")).collect();
        let set = reconcile(best_grades(&records), &small_catalog(), DEFAULT_ELECTIVE_CAP);

        let pool: Vec<_> = set.optional().collect();
        assert_eq!(pool.len(), 12);
        assert_eq!(pool.iter().filter(|c| c.current_grade != "F").count(), 8);
        for course in &pool[8..] {
            assert_eq!(course.current_grade, "F");
            assert_eq!(course.original_grade, "F");
        }
        // FREE8 and FREE9 ranked 9th and 10th and were demoted
        assert_eq!(set.get("FREE9").map(|c| c.original_grade.as_str()), Some("F"));
    }

    #[test]
    fn test_custom_cap() {
        let records = [rec("E1", "A"), rec("E2", "B")];
        let set = reconcile(best_grades(&records), &small_catalog(), 1);
        assert_eq!(set.get("E1").map(|c| c.current_grade.as_str()), Some("A"));
        assert_eq!(set.get("E2").map(|c| c.current_grade.as_str()), Some("F"));
    }

    #[test]
    fn test_overlapping_catalog_code_consumed_by_required() {
        let catalog = Catalog::new(
            vec![CurriculumEntry::new("X1", "Shared", 3, "F")],
            vec![CurriculumEntry::new("X1", "Shared", 3, "F")],
        );
        let set = reconcile(best_grades(&[rec("X1", "A")]), &catalog, DEFAULT_ELECTIVE_CAP);
        let required: Vec<_> = set.required().collect();
        let optional: Vec<_> = set.optional().collect();
        assert_eq!(required[0].current_grade, "A");
        assert!(optional[0].is_predicted);
        assert_eq!(optional[0].current_grade, "F");
    }
}

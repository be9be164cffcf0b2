//! Data models for `gpa-planner`

pub mod curriculum;
pub mod grade_record;
pub mod reconciled;

pub use curriculum::{CurriculumEntry, ProgramInfo};
pub use grade_record::GradeRecord;
pub use reconciled::{CourseSet, ReconciledCourse};

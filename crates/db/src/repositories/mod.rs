pub mod academic_year_repo;
pub mod class_repo;
pub mod enrollment_repo;
pub mod grade_repo;
pub mod parent_repo;
pub mod score_repo;
pub mod student_repo;
pub mod subject_repo;
pub mod user_repo;

pub use academic_year_repo::AcademicYearRepo;
pub use class_repo::ClassRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use grade_repo::GradeRepo;
pub use parent_repo::ParentRepo;
pub use score_repo::ScoreRepo;
pub use student_repo::StudentRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;

/// Outcome of a dependency-guarded delete.
///
/// The count check and the delete run in one transaction, so `Blocked`
/// reflects the dependent-row count at the moment the delete would have
/// happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedDelete {
    Deleted,
    /// Blocked by this many dependent rows.
    Blocked(i64),
    NotFound,
}

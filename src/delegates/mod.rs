//! 实体委托
//!
//! 每个实体一个委托，借用客户端持有的连接或事务执行查询。

#[macro_use]
mod macros;

pub(crate) mod query;
mod relations;

pub mod assignments;
pub mod attendances;
pub mod classes;
pub mod enrollments;
pub mod exams;
pub mod lessons;
pub mod student_archives;
pub mod student_parent_relations;
pub mod subjects;
pub mod users;

pub use assignments::AssignmentDelegate;
pub use attendances::AttendanceDelegate;
pub use classes::ClassDelegate;
pub use enrollments::EnrollmentDelegate;
pub use exams::ExamDelegate;
pub use lessons::LessonDelegate;
pub use student_archives::StudentArchiveDelegate;
pub use student_parent_relations::StudentParentRelationDelegate;
pub use subjects::SubjectDelegate;
pub use users::UserDelegate;

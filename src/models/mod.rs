//! 业务模型
//!
//! 每个实体目录下：`entities` 为业务记录，`requests` 为查询与写入参数，
//! `responses` 为携带关联数据的查询结果。

pub mod common;

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

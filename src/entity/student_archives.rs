//! 学生档案实体
//!
//! 学生离校时的快照，不引用任何表，学生记录删除后档案仍然保留。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_archives")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<i64>,
    pub class_name: Option<String>,
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
    pub teacher_name: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub reason: Option<String>,
    pub extra: Option<Json>,
    pub archived_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_archive(self) -> crate::models::student_archives::entities::StudentArchive {
        use crate::models::student_archives::entities::StudentArchive;
        use crate::models::users::entities::Gender;
        use crate::utils::from_timestamp;

        StudentArchive {
            id: self.id,
            student_id: self.student_id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender.and_then(|g| g.parse::<Gender>().ok()),
            birth_date: self.birth_date.map(from_timestamp),
            class_name: self.class_name,
            grade_level: self.grade_level,
            academic_year: self.academic_year,
            teacher_name: self.teacher_name,
            parent_name: self.parent_name,
            parent_email: self.parent_email,
            parent_phone: self.parent_phone,
            reason: self.reason,
            extra: self.extra,
            archived_at: from_timestamp(self.archived_at),
        }
    }
}

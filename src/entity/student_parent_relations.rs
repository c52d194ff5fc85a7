//! 学生家长关系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_parent_relations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub parent_id: i64,
    pub relationship: Option<String>,
    pub created_at: i64,
}

// 两条外键都指向 users，因此不实现 Related<users::Entity>
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ParentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_parent_relation(
        self,
    ) -> crate::models::student_parent_relations::entities::StudentParentRelation {
        use crate::models::student_parent_relations::entities::StudentParentRelation;
        use crate::utils::from_timestamp;

        StudentParentRelation {
            id: self.id,
            student_id: self.student_id,
            parent_id: self.parent_id,
            relationship: self.relationship,
            created_at: from_timestamp(self.created_at),
        }
    }
}

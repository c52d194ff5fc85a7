use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::student_parent_relations::{ActiveModel, Column};
use crate::entity::users;
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::student_parent_relations::entities::StudentParentRelation;
use crate::models::student_parent_relations::requests::{
    StudentParentRelationCreateInput, StudentParentRelationInclude,
    StudentParentRelationUpdateInput, StudentParentRelationWhereInput,
    StudentParentRelationWhereUniqueInput,
};
use crate::models::student_parent_relations::responses::StudentParentRelationWithRelations;

define_delegate! {
    /// 学生家长关系委托
    StudentParentRelationDelegate {
        module: student_parent_relations,
        name: "StudentParentRelation",
        label: "家长关系",
        record: StudentParentRelation,
        into_record: into_student_parent_relation,
        where_input: StudentParentRelationWhereInput,
        where_unique: StudentParentRelationWhereUniqueInput,
        create: StudentParentRelationCreateInput,
        update: StudentParentRelationUpdateInput,
        include: StudentParentRelationInclude,
        with_relations: StudentParentRelationWithRelations,
        numeric: [Id, StudentId, ParentId],
    }
}

impl WhereInput for StudentParentRelationWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.student_id {
            cond = cond.add(f.to_condition(Column::StudentId));
        }
        if let Some(ref f) = self.parent_id {
            cond = cond.add(f.to_condition(Column::ParentId));
        }
        if let Some(ref f) = self.relationship {
            cond = cond.add(f.to_condition(Column::Relationship));
        }
        if let Some(ref f) = self.created_at {
            cond = cond.add(f.to_condition(Column::CreatedAt));
        }
        if let Some(ref f) = self.student {
            cond = cond.add(f.to_condition(Column::StudentId, users::Column::Id));
        }
        if let Some(ref f) = self.parent {
            cond = cond.add(f.to_condition(Column::ParentId, users::Column::Id));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl StudentParentRelationWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            Self::Id(id) => Condition::all().add(Column::Id.eq(*id)),
            Self::StudentIdParentId {
                student_id,
                parent_id,
            } => Condition::all()
                .add(Column::StudentId.eq(*student_id))
                .add(Column::ParentId.eq(*parent_id)),
        }
    }
}

fn check_distinct(student_id: i64, parent_id: i64) -> Result<()> {
    if student_id == parent_id {
        return Err(SchoolError::validation(
            "A student cannot be their own parent",
        ));
    }
    Ok(())
}

impl StudentParentRelationCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        check_distinct(self.student_id, self.parent_id)?;

        Ok(ActiveModel {
            student_id: Set(self.student_id),
            parent_id: Set(self.parent_id),
            relationship: Set(self.relationship),
            created_at: Set(now),
            ..Default::default()
        })
    }
}

impl StudentParentRelationUpdateInput {
    // 关系记录只有 created_at
    pub(crate) fn into_active_model(self, _now: i64) -> Result<ActiveModel> {
        if let (Some(student_id), Some(parent_id)) = (self.student_id, self.parent_id) {
            check_distinct(student_id, parent_id)?;
        }

        let mut model = <ActiveModel as Default>::default();
        if let Some(student_id) = self.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(parent_id) = self.parent_id {
            model.parent_id = Set(parent_id);
        }
        if let Some(relationship) = self.relationship {
            model.relationship = Set(relationship);
        }
        Ok(model)
    }
}

impl StudentParentRelationInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        relations: Vec<StudentParentRelation>,
    ) -> Result<Vec<StudentParentRelationWithRelations>> {
        let students = if self.student {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    relations.iter().map(|r| r.student_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "student_parent_relations.student",
                )
                .await?,
            )
        } else {
            None
        };
        let parents = if self.parent {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    relations.iter().map(|r| r.parent_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "student_parent_relations.parent",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(relations
            .into_iter()
            .map(|relation| StudentParentRelationWithRelations {
                student: students
                    .as_ref()
                    .and_then(|m| m.get(&relation.student_id).cloned()),
                parent: parents
                    .as_ref()
                    .and_then(|m| m.get(&relation.parent_id).cloned()),
                relation,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::common::{FindManyArgs, ListRelationFilter};
    use crate::models::student_parent_relations::requests::*;
    use crate::models::users::entities::Role;
    use crate::models::users::requests::{UserInclude, UserWhereInput, UserWhereUniqueInput};
    use crate::models::common::FindUniqueArgs;
    use crate::testing::{memory_client, seed_user};

    #[tokio::test]
    async fn test_link_parent_and_load_both_sides() {
        let client = memory_client().await;
        let student = seed_user(&client, "kid", Role::Student).await;
        let mother = seed_user(&client, "mom", Role::Parent).await;
        let father = seed_user(&client, "dad", Role::Parent).await;

        for (parent, label) in [(&mother, "mother"), (&father, "father")] {
            client
                .student_parent_relation()
                .create(
                    StudentParentRelationCreateInput::new(student.id, parent.id)
                        .relationship(label),
                )
                .await
                .unwrap();
        }

        let relations = client
            .student_parent_relation()
            .find_many(FindManyArgs::new().include(StudentParentRelationInclude {
                parent: true,
                student: true,
            }))
            .await
            .unwrap();
        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].parent.as_ref().map(|p| p.id), Some(mother.id));
        assert_eq!(relations[1].student.as_ref().map(|s| s.id), Some(student.id));

        let kid = client
            .user()
            .find_unique(
                FindUniqueArgs::new(UserWhereUniqueInput::Id(student.id)).include(UserInclude {
                    parents: true,
                    children: true,
                    ..Default::default()
                }),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kid.parents.as_ref().map(Vec::len), Some(2));
        assert_eq!(kid.children.as_ref().map(Vec::len), Some(0));

        let with_children = client
            .user()
            .count(Some(UserWhereInput {
                children: Some(ListRelationFilter::some(
                    StudentParentRelationWhereInput::default(),
                )),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(with_children, 2);
    }

    #[tokio::test]
    async fn test_rejects_self_relation_and_duplicates() {
        let client = memory_client().await;
        let student = seed_user(&client, "solo", Role::Student).await;
        let parent = seed_user(&client, "guardian", Role::Parent).await;

        let err = client
            .student_parent_relation()
            .create(StudentParentRelationCreateInput::new(student.id, student.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        client
            .student_parent_relation()
            .create(StudentParentRelationCreateInput::new(student.id, parent.id))
            .await
            .unwrap();
        let err = client
            .student_parent_relation()
            .create(StudentParentRelationCreateInput::new(student.id, parent.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        let removed = client
            .student_parent_relation()
            .delete(StudentParentRelationWhereUniqueInput::StudentIdParentId {
                student_id: student.id,
                parent_id: parent.id,
            })
            .await
            .unwrap();
        assert_eq!(removed.parent_id, parent.id);
    }
}

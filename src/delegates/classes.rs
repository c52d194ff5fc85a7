use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::{load_many, load_one};
use crate::entity::classes::{ActiveModel, Column};
use crate::entity::{attendances, enrollments, subjects, users};
use crate::errors::{Result, SchoolError};
use crate::models::classes::entities::Class;
use crate::models::classes::requests::{
    ClassCreateInput, ClassInclude, ClassUpdateInput, ClassWhereInput, ClassWhereUniqueInput,
};
use crate::models::classes::responses::ClassWithRelations;
use crate::models::common::{WhereInput, combine_logical};
use crate::utils::validate::{validate_academic_year, validate_non_negative, validate_required};

define_delegate! {
    /// 班级委托
    ClassDelegate {
        module: classes,
        name: "Class",
        label: "班级",
        record: Class,
        into_record: into_class,
        where_input: ClassWhereInput,
        where_unique: ClassWhereUniqueInput,
        create: ClassCreateInput,
        update: ClassUpdateInput,
        include: ClassInclude,
        with_relations: ClassWithRelations,
        numeric: [Id, GradeLevel, TeacherId],
    }
}

impl WhereInput for ClassWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.name {
            cond = cond.add(f.to_condition(Column::Name));
        }
        if let Some(ref f) = self.grade_level {
            cond = cond.add(f.to_condition(Column::GradeLevel));
        }
        if let Some(ref f) = self.academic_year {
            cond = cond.add(f.to_condition(Column::AcademicYear));
        }
        if let Some(ref f) = self.teacher_id {
            cond = cond.add(f.to_condition(Column::TeacherId));
        }
        if let Some(ref f) = self.created_at {
            cond = cond.add(f.to_condition(Column::CreatedAt));
        }
        if let Some(ref f) = self.updated_at {
            cond = cond.add(f.to_condition(Column::UpdatedAt));
        }

        if let Some(ref f) = self.teacher {
            cond = cond.add(f.to_condition(Column::TeacherId, users::Column::Id));
        }
        if let Some(ref f) = self.subjects {
            cond = cond.add(f.to_condition(Column::Id, subjects::Column::ClassId));
        }
        if let Some(ref f) = self.enrollments {
            cond = cond.add(f.to_condition(Column::Id, enrollments::Column::ClassId));
        }
        if let Some(ref f) = self.attendances {
            cond = cond.add(f.to_condition(Column::Id, attendances::Column::ClassId));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl ClassWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            ClassWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl ClassCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("name", &self.name).map_err(SchoolError::validation)?;
        validate_academic_year(&self.academic_year).map_err(SchoolError::validation)?;
        validate_non_negative("grade_level", f64::from(self.grade_level))
            .map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            name: Set(self.name),
            grade_level: Set(self.grade_level),
            academic_year: Set(self.academic_year),
            teacher_id: Set(self.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl ClassUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(name) = self.name {
            validate_required("name", &name).map_err(SchoolError::validation)?;
            model.name = Set(name);
        }
        if let Some(grade_level) = self.grade_level {
            validate_non_negative("grade_level", f64::from(grade_level))
                .map_err(SchoolError::validation)?;
            model.grade_level = Set(grade_level);
        }
        if let Some(academic_year) = self.academic_year {
            validate_academic_year(&academic_year).map_err(SchoolError::validation)?;
            model.academic_year = Set(academic_year);
        }
        if let Some(teacher_id) = self.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        if model.is_changed() {
            model.updated_at = Set(now);
        }
        Ok(model)
    }
}

impl ClassInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        classes: Vec<Class>,
    ) -> Result<Vec<ClassWithRelations>> {
        let ids: Vec<i64> = classes.iter().map(|c| c.id).collect();

        let teachers = if self.teacher {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    classes.iter().map(|c| c.teacher_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "classes.teacher",
                )
                .await?,
            )
        } else {
            None
        };
        let mut subjects = if self.subjects {
            Some(
                load_many::<subjects::Entity, _, _>(
                    db,
                    subjects::Column::ClassId,
                    subjects::Column::Id,
                    ids.iter().copied(),
                    |m| m.class_id,
                    |m| m.into_subject(),
                    "classes.subjects",
                )
                .await?,
            )
        } else {
            None
        };
        let mut enrollments = if self.enrollments {
            Some(
                load_many::<enrollments::Entity, _, _>(
                    db,
                    enrollments::Column::ClassId,
                    enrollments::Column::Id,
                    ids.iter().copied(),
                    |m| m.class_id,
                    |m| m.into_enrollment(),
                    "classes.enrollments",
                )
                .await?,
            )
        } else {
            None
        };
        let mut attendances = if self.attendances {
            Some(
                load_many::<attendances::Entity, _, _>(
                    db,
                    attendances::Column::ClassId,
                    attendances::Column::Id,
                    ids.iter().copied(),
                    |m| m.class_id,
                    |m| m.into_attendance(),
                    "classes.attendances",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(classes
            .into_iter()
            .map(|class| {
                let id = class.id;
                ClassWithRelations {
                    teacher: teachers
                        .as_ref()
                        .and_then(|m| m.get(&class.teacher_id).cloned()),
                    subjects: subjects.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    enrollments: enrollments
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    attendances: attendances
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    class,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::classes::Column;
    use crate::models::classes::requests::*;
    use crate::models::common::{
        AggregateArgs, FindManyArgs, GroupByArgs, IntFilter, OrderByInput, RelationFilter,
        StringFilter,
    };
    use crate::models::users::entities::Role;
    use crate::models::users::requests::UserWhereInput;
    use crate::testing::{memory_client, seed_class, seed_subject, seed_user};

    #[tokio::test]
    async fn test_create_validates_academic_year() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "teach", Role::Teacher).await;

        let err = client
            .class()
            .create(ClassCreateInput::new("8C", 8, "next year", teacher.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = client
            .class()
            .create(ClassCreateInput::new("8C", -1, "2024-2025", teacher.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_missing_teacher_is_foreign_key_error() {
        let client = memory_client().await;
        let err = client
            .class()
            .create(ClassCreateInput::new("9A", 9, "2024-2025", 777))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_include_teacher_and_subjects() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "homeroom", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "5A").await;
        seed_subject(&client, class.id, teacher.id, "Math").await;
        seed_subject(&client, class.id, teacher.id, "Art").await;

        let loaded = client
            .class()
            .find_unique_or_throw(
                ClassFindUniqueArgs::new(ClassWhereUniqueInput::Id(class.id)).include(
                    ClassInclude {
                        teacher: true,
                        subjects: true,
                        ..Default::default()
                    },
                ),
            )
            .await
            .unwrap();

        assert_eq!(loaded.teacher.as_ref().map(|t| t.id), Some(teacher.id));
        let names: Vec<_> = loaded
            .subjects
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Math", "Art"]);
        assert!(loaded.enrollments.is_none());
    }

    #[tokio::test]
    async fn test_filter_by_teacher_relation() {
        let client = memory_client().await;
        let alice = seed_user(&client, "alice", Role::Teacher).await;
        let bob = seed_user(&client, "bob", Role::Teacher).await;
        seed_class(&client, alice.id, "1A").await;
        seed_class(&client, bob.id, "1B").await;
        seed_class(&client, bob.id, "1C").await;

        let bobs = client
            .class()
            .find_many(
                FindManyArgs::new()
                    .filter(ClassWhereInput {
                        teacher: Some(RelationFilter::is(UserWhereInput {
                            username: Some(StringFilter::equals("bob")),
                            ..Default::default()
                        })),
                        ..Default::default()
                    })
                    .order_by(OrderByInput::desc(Column::Name)),
            )
            .await
            .unwrap();
        let names: Vec<_> = bobs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["1C", "1B"]);
    }

    #[tokio::test]
    async fn test_aggregate_grade_levels() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "grader", Role::Teacher).await;
        for (name, grade) in [("3A", 3), ("5A", 5), ("7A", 7)] {
            client
                .class()
                .create(ClassCreateInput::new(name, grade, "2024-2025", teacher.id))
                .await
                .unwrap();
        }

        let result = client
            .class()
            .aggregate(
                AggregateArgs::new()
                    .count()
                    .avg(Column::GradeLevel)
                    .sum(Column::GradeLevel)
                    .min(Column::GradeLevel)
                    .max(Column::GradeLevel),
            )
            .await
            .unwrap();
        assert_eq!(result.count, Some(3));
        assert_eq!(result.avg_of("grade_level"), Some(5.0));
        assert_eq!(result.sum_of("grade_level"), Some(15.0));
        assert_eq!(result.min_of("grade_level"), Some(3.0));
        assert_eq!(result.max_of("grade_level"), Some(7.0));

        let empty = client
            .class()
            .aggregate(
                AggregateArgs::new()
                    .filter(ClassWhereInput {
                        grade_level: Some(IntFilter::gt(100)),
                        ..Default::default()
                    })
                    .count()
                    .avg(Column::GradeLevel),
            )
            .await
            .unwrap();
        assert_eq!(empty.count, Some(0));
        assert_eq!(empty.avg_of("grade_level"), None);
    }

    #[tokio::test]
    async fn test_group_by_academic_year() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "planner", Role::Teacher).await;
        for (name, year) in [("A", "2023-2024"), ("B", "2024-2025"), ("C", "2024-2025")] {
            client
                .class()
                .create(ClassCreateInput::new(name, 1, year, teacher.id))
                .await
                .unwrap();
        }

        let rows = client
            .class()
            .group_by(
                GroupByArgs::new(vec![Column::AcademicYear])
                    .count()
                    .order_by(OrderByInput::asc(Column::AcademicYear)),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key("academic_year"), Some(&serde_json::json!("2023-2024")));
        assert_eq!(rows[0].aggregates.count, Some(1));
        assert_eq!(rows[1].aggregates.count, Some(2));

        let err = client
            .class()
            .group_by(GroupByArgs::<ClassWhereInput, Column>::new(vec![]).count())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_paginate() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "pager", Role::Teacher).await;
        for i in 0..5 {
            seed_class(&client, teacher.id, &format!("P{i}")).await;
        }

        let page = client
            .class()
            .paginate(None, vec![OrderByInput::asc(Column::Name)], 2, 2)
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["P2", "P3"]);
    }
}

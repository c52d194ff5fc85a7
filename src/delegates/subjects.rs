use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::{load_many, load_one};
use crate::entity::subjects::{ActiveModel, Column};
use crate::entity::{assignments, classes, exams, lessons, users};
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::{
    SubjectCreateInput, SubjectInclude, SubjectUpdateInput, SubjectWhereInput,
    SubjectWhereUniqueInput,
};
use crate::models::subjects::responses::SubjectWithRelations;
use crate::utils::validate::validate_required;

define_delegate! {
    /// 科目委托
    SubjectDelegate {
        module: subjects,
        name: "Subject",
        label: "科目",
        record: Subject,
        into_record: into_subject,
        where_input: SubjectWhereInput,
        where_unique: SubjectWhereUniqueInput,
        create: SubjectCreateInput,
        update: SubjectUpdateInput,
        include: SubjectInclude,
        with_relations: SubjectWithRelations,
        numeric: [Id, ClassId, TeacherId],
    }
}

impl WhereInput for SubjectWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.name {
            cond = cond.add(f.to_condition(Column::Name));
        }
        if let Some(ref f) = self.code {
            cond = cond.add(f.to_condition(Column::Code));
        }
        if let Some(ref f) = self.description {
            cond = cond.add(f.to_condition(Column::Description));
        }
        if let Some(ref f) = self.class_id {
            cond = cond.add(f.to_condition(Column::ClassId));
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

        if let Some(ref f) = self.class {
            cond = cond.add(f.to_condition(Column::ClassId, classes::Column::Id));
        }
        if let Some(ref f) = self.teacher {
            cond = cond.add(f.to_condition(Column::TeacherId, users::Column::Id));
        }
        if let Some(ref f) = self.lessons {
            cond = cond.add(f.to_condition(Column::Id, lessons::Column::SubjectId));
        }
        if let Some(ref f) = self.assignments {
            cond = cond.add(f.to_condition(Column::Id, assignments::Column::SubjectId));
        }
        if let Some(ref f) = self.exams {
            cond = cond.add(f.to_condition(Column::Id, exams::Column::SubjectId));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl SubjectWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            SubjectWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl SubjectCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("name", &self.name).map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            name: Set(self.name),
            code: Set(self.code),
            description: Set(self.description),
            class_id: Set(self.class_id),
            teacher_id: Set(self.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl SubjectUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(name) = self.name {
            validate_required("name", &name).map_err(SchoolError::validation)?;
            model.name = Set(name);
        }
        if let Some(code) = self.code {
            model.code = Set(code);
        }
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(class_id) = self.class_id {
            model.class_id = Set(class_id);
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

impl SubjectInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        subjects: Vec<Subject>,
    ) -> Result<Vec<SubjectWithRelations>> {
        let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();

        let classes = if self.class {
            Some(
                load_one::<classes::Entity, _, _>(
                    db,
                    classes::Column::Id,
                    subjects.iter().map(|s| s.class_id),
                    |m| m.id,
                    |m| m.into_class(),
                    "subjects.class",
                )
                .await?,
            )
        } else {
            None
        };
        let teachers = if self.teacher {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    subjects.iter().map(|s| s.teacher_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "subjects.teacher",
                )
                .await?,
            )
        } else {
            None
        };
        let mut lessons = if self.lessons {
            Some(
                load_many::<lessons::Entity, _, _>(
                    db,
                    lessons::Column::SubjectId,
                    lessons::Column::ScheduledAt,
                    ids.iter().copied(),
                    |m| m.subject_id,
                    |m| m.into_lesson(),
                    "subjects.lessons",
                )
                .await?,
            )
        } else {
            None
        };
        let mut assignments = if self.assignments {
            Some(
                load_many::<assignments::Entity, _, _>(
                    db,
                    assignments::Column::SubjectId,
                    assignments::Column::DueDate,
                    ids.iter().copied(),
                    |m| m.subject_id,
                    |m| m.into_assignment(),
                    "subjects.assignments",
                )
                .await?,
            )
        } else {
            None
        };
        let mut exams = if self.exams {
            Some(
                load_many::<exams::Entity, _, _>(
                    db,
                    exams::Column::SubjectId,
                    exams::Column::ExamDate,
                    ids.iter().copied(),
                    |m| m.subject_id,
                    |m| m.into_exam(),
                    "subjects.exams",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(subjects
            .into_iter()
            .map(|subject| {
                let id = subject.id;
                SubjectWithRelations {
                    class: classes
                        .as_ref()
                        .and_then(|m| m.get(&subject.class_id).cloned()),
                    teacher: teachers
                        .as_ref()
                        .and_then(|m| m.get(&subject.teacher_id).cloned()),
                    lessons: lessons.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    assignments: assignments
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    exams: exams.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    subject,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::entity::subjects::Column;
    use crate::models::common::{FindManyArgs, ListRelationFilter, StringFilter};
    use crate::models::lessons::requests::{LessonCreateInput, LessonWhereInput};
    use crate::models::subjects::requests::*;
    use crate::models::users::entities::Role;
    use crate::testing::{memory_client, seed_class, seed_subject, seed_user};

    #[tokio::test]
    async fn test_create_with_optional_fields() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "physics", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "10A").await;

        let subject = client
            .subject()
            .create(
                SubjectCreateInput::new("Physics", class.id, teacher.id)
                    .code("PHY-10")
                    .description("Mechanics and optics"),
            )
            .await
            .unwrap();
        assert_eq!(subject.code.as_deref(), Some("PHY-10"));

        let cleared = client
            .subject()
            .update(
                SubjectWhereUniqueInput::Id(subject.id),
                SubjectUpdateInput {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.code.as_deref(), Some("PHY-10"));

        let err = client
            .subject()
            .create(SubjectCreateInput::new("  ", class.id, teacher.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_lessons_relation_filter_and_include_ordering() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "chem", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "11B").await;
        let chemistry = seed_subject(&client, class.id, teacher.id, "Chemistry").await;
        seed_subject(&client, class.id, teacher.id, "Biology").await;

        let now = Utc::now();
        for (title, offset) in [("Titration", 2), ("Atoms", 1)] {
            client
                .lesson()
                .create(LessonCreateInput::new(
                    chemistry.id,
                    title,
                    now + Duration::days(offset),
                ))
                .await
                .unwrap();
        }

        let found = client
            .subject()
            .find_many(
                FindManyArgs::new()
                    .filter(SubjectWhereInput {
                        lessons: Some(ListRelationFilter::some(LessonWhereInput {
                            title: Some(StringFilter::contains("atom").insensitive()),
                            ..Default::default()
                        })),
                        ..Default::default()
                    })
                    .include(SubjectInclude {
                        lessons: true,
                        class: true,
                        ..Default::default()
                    }),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, chemistry.id);
        assert_eq!(found[0].class.as_ref().map(|c| c.id), Some(class.id));

        let titles: Vec<_> = found[0]
            .lessons
            .as_ref()
            .unwrap()
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, ["Atoms", "Titration"]);
    }

    #[tokio::test]
    async fn test_select_columns() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "music", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "2A").await;
        seed_subject(&client, class.id, teacher.id, "Music").await;

        let rows = client
            .subject()
            .find_many_select(FindManyArgs::new(), &[Column::Name, Column::ClassId])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Music");
        assert_eq!(rows[0]["class_id"], class.id);
        assert!(rows[0].get("teacher_id").is_none());
    }
}

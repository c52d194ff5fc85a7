use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::exams::{ActiveModel, Column};
use crate::entity::{subjects, users};
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::exams::entities::Exam;
use crate::models::exams::requests::{
    ExamCreateInput, ExamInclude, ExamUpdateInput, ExamWhereInput, ExamWhereUniqueInput,
};
use crate::models::exams::responses::ExamWithRelations;
use crate::utils::validate::{validate_non_negative, validate_required};

define_delegate! {
    /// 考试委托
    ExamDelegate {
        module: exams,
        name: "Exam",
        label: "考试",
        record: Exam,
        into_record: into_exam,
        where_input: ExamWhereInput,
        where_unique: ExamWhereUniqueInput,
        create: ExamCreateInput,
        update: ExamUpdateInput,
        include: ExamInclude,
        with_relations: ExamWithRelations,
        numeric: [Id, SubjectId, TeacherId, DurationMinutes, MaxScore],
    }
}

impl WhereInput for ExamWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.subject_id {
            cond = cond.add(f.to_condition(Column::SubjectId));
        }
        if let Some(ref f) = self.teacher_id {
            cond = cond.add(f.to_condition(Column::TeacherId));
        }
        if let Some(ref f) = self.title {
            cond = cond.add(f.to_condition(Column::Title));
        }
        if let Some(ref f) = self.description {
            cond = cond.add(f.to_condition(Column::Description));
        }
        if let Some(ref f) = self.exam_date {
            cond = cond.add(f.to_condition(Column::ExamDate));
        }
        if let Some(ref f) = self.duration_minutes {
            cond = cond.add(f.to_condition(Column::DurationMinutes));
        }
        if let Some(ref f) = self.max_score {
            cond = cond.add(f.to_condition(Column::MaxScore));
        }
        if let Some(ref f) = self.created_at {
            cond = cond.add(f.to_condition(Column::CreatedAt));
        }
        if let Some(ref f) = self.updated_at {
            cond = cond.add(f.to_condition(Column::UpdatedAt));
        }
        if let Some(ref f) = self.subject {
            cond = cond.add(f.to_condition(Column::SubjectId, subjects::Column::Id));
        }
        if let Some(ref f) = self.teacher {
            cond = cond.add(f.to_condition(Column::TeacherId, users::Column::Id));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl ExamWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            ExamWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl ExamCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("title", &self.title).map_err(SchoolError::validation)?;
        validate_non_negative("duration_minutes", f64::from(self.duration_minutes))
            .map_err(SchoolError::validation)?;
        validate_non_negative("max_score", self.max_score).map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            subject_id: Set(self.subject_id),
            teacher_id: Set(self.teacher_id),
            title: Set(self.title),
            description: Set(self.description),
            exam_date: Set(self.exam_date.timestamp()),
            duration_minutes: Set(self.duration_minutes),
            max_score: Set(self.max_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl ExamUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(subject_id) = self.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(teacher_id) = self.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(title) = self.title {
            validate_required("title", &title).map_err(SchoolError::validation)?;
            model.title = Set(title);
        }
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(exam_date) = self.exam_date {
            model.exam_date = Set(exam_date.timestamp());
        }
        if let Some(minutes) = self.duration_minutes {
            validate_non_negative("duration_minutes", f64::from(minutes))
                .map_err(SchoolError::validation)?;
            model.duration_minutes = Set(minutes);
        }
        if let Some(max_score) = self.max_score {
            validate_non_negative("max_score", max_score).map_err(SchoolError::validation)?;
            model.max_score = Set(max_score);
        }

        if model.is_changed() {
            model.updated_at = Set(now);
        }
        Ok(model)
    }
}

impl ExamInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        exams: Vec<Exam>,
    ) -> Result<Vec<ExamWithRelations>> {
        let subjects = if self.subject {
            Some(
                load_one::<subjects::Entity, _, _>(
                    db,
                    subjects::Column::Id,
                    exams.iter().map(|e| e.subject_id),
                    |m| m.id,
                    |m| m.into_subject(),
                    "exams.subject",
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
                    exams.iter().map(|e| e.teacher_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "exams.teacher",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(exams
            .into_iter()
            .map(|exam| ExamWithRelations {
                subject: subjects
                    .as_ref()
                    .and_then(|m| m.get(&exam.subject_id).cloned()),
                teacher: teachers
                    .as_ref()
                    .and_then(|m| m.get(&exam.teacher_id).cloned()),
                exam,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::entity::exams::Column;
    use crate::models::common::{GroupByArgs, IntFilter, OrderByInput};
    use crate::models::exams::requests::*;
    use crate::models::users::entities::Role;
    use crate::testing::{memory_client, seed_class, seed_subject, seed_user};

    #[tokio::test]
    async fn test_update_many_reschedules_matching_exams() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "examiner", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "12A").await;
        let subject = seed_subject(&client, class.id, teacher.id, "Latin").await;
        let date = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();

        for (title, minutes) in [("Midterm", 60), ("Final", 120), ("Oral", 15)] {
            client
                .exam()
                .create(ExamCreateInput::new(subject.id, teacher.id, title, date, minutes, 100.0))
                .await
                .unwrap();
        }

        let moved = Utc.with_ymd_and_hms(2025, 1, 17, 9, 0, 0).unwrap();
        let payload = client
            .exam()
            .update_many(
                Some(ExamWhereInput {
                    duration_minutes: Some(IntFilter::gte(60)),
                    ..Default::default()
                }),
                ExamUpdateInput {
                    exam_date: Some(moved),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(payload.count, 2);

        let oral = client
            .exam()
            .find_first_or_throw(
                ExamFindManyArgs::new()
                    .filter(ExamWhereInput {
                        duration_minutes: Some(IntFilter::lt(60)),
                        ..Default::default()
                    })
                    .include(ExamInclude {
                        teacher: true,
                        ..Default::default()
                    }),
            )
            .await
            .unwrap();
        assert_eq!(oral.exam_date, date);
        assert_eq!(oral.teacher.as_ref().map(|t| t.id), Some(teacher.id));

        let noop = client
            .exam()
            .update_many(None, ExamUpdateInput::default())
            .await
            .unwrap();
        assert_eq!(noop.count, 3);
    }

    #[tokio::test]
    async fn test_group_by_date_with_min_max() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "proctor", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "12B").await;
        let subject = seed_subject(&client, class.id, teacher.id, "Geo").await;
        let day_one = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();

        for (date, score) in [(day_one, 50.0), (day_one, 80.0), (day_two, 100.0)] {
            client
                .exam()
                .create(ExamCreateInput::new(subject.id, teacher.id, "Paper", date, 90, score))
                .await
                .unwrap();
        }

        let rows = client
            .exam()
            .group_by(
                GroupByArgs::new(vec![Column::ExamDate])
                    .min(Column::MaxScore)
                    .max(Column::MaxScore)
                    .order_by(OrderByInput::desc(Column::ExamDate))
                    .take(1),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key("exam_date"), Some(&serde_json::json!(day_two.timestamp())));
        assert_eq!(rows[0].aggregates.max_of("max_score"), Some(100.0));
        assert_eq!(rows[0].aggregates.count, None);
    }
}

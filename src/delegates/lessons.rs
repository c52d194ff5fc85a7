use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::lessons::{ActiveModel, Column};
use crate::entity::subjects;
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::lessons::entities::Lesson;
use crate::models::lessons::requests::{
    LessonCreateInput, LessonInclude, LessonUpdateInput, LessonWhereInput, LessonWhereUniqueInput,
};
use crate::models::lessons::responses::LessonWithRelations;
use crate::utils::validate::{validate_non_negative, validate_required};

define_delegate! {
    /// 课时委托
    LessonDelegate {
        module: lessons,
        name: "Lesson",
        label: "课时",
        record: Lesson,
        into_record: into_lesson,
        where_input: LessonWhereInput,
        where_unique: LessonWhereUniqueInput,
        create: LessonCreateInput,
        update: LessonUpdateInput,
        include: LessonInclude,
        with_relations: LessonWithRelations,
        numeric: [Id, SubjectId, DurationMinutes],
    }
}

impl WhereInput for LessonWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.subject_id {
            cond = cond.add(f.to_condition(Column::SubjectId));
        }
        if let Some(ref f) = self.title {
            cond = cond.add(f.to_condition(Column::Title));
        }
        if let Some(ref f) = self.content {
            cond = cond.add(f.to_condition(Column::Content));
        }
        if let Some(ref f) = self.scheduled_at {
            cond = cond.add(f.to_condition(Column::ScheduledAt));
        }
        if let Some(ref f) = self.duration_minutes {
            cond = cond.add(f.to_condition(Column::DurationMinutes));
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

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl LessonWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            LessonWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl LessonCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("title", &self.title).map_err(SchoolError::validation)?;
        validate_non_negative("duration_minutes", f64::from(self.duration_minutes))
            .map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            subject_id: Set(self.subject_id),
            title: Set(self.title),
            content: Set(self.content),
            scheduled_at: Set(self.scheduled_at.timestamp()),
            duration_minutes: Set(self.duration_minutes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl LessonUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(subject_id) = self.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(title) = self.title {
            validate_required("title", &title).map_err(SchoolError::validation)?;
            model.title = Set(title);
        }
        if let Some(content) = self.content {
            model.content = Set(content);
        }
        if let Some(scheduled_at) = self.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }
        if let Some(minutes) = self.duration_minutes {
            validate_non_negative("duration_minutes", f64::from(minutes))
                .map_err(SchoolError::validation)?;
            model.duration_minutes = Set(minutes);
        }

        if model.is_changed() {
            model.updated_at = Set(now);
        }
        Ok(model)
    }
}

impl LessonInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        lessons: Vec<Lesson>,
    ) -> Result<Vec<LessonWithRelations>> {
        if !self.subject {
            return Ok(lessons.into_iter().map(LessonWithRelations::from).collect());
        }

        let subjects = load_one::<subjects::Entity, _, _>(
            db,
            subjects::Column::Id,
            lessons.iter().map(|l| l.subject_id),
            |m| m.id,
            |m| m.into_subject(),
            "lessons.subject",
        )
        .await?;

        Ok(lessons
            .into_iter()
            .map(|lesson| LessonWithRelations {
                subject: subjects.get(&lesson.subject_id).cloned(),
                lesson,
            })
            .collect())
    }
}

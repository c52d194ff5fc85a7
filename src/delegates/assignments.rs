use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::assignments::{ActiveModel, Column};
use crate::entity::{subjects, users};
use crate::errors::{Result, SchoolError};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::{
    AssignmentCreateInput, AssignmentInclude, AssignmentUpdateInput, AssignmentWhereInput,
    AssignmentWhereUniqueInput,
};
use crate::models::assignments::responses::AssignmentWithRelations;
use crate::models::common::{WhereInput, combine_logical};
use crate::utils::validate::{validate_non_negative, validate_required};

define_delegate! {
    /// 作业委托
    AssignmentDelegate {
        module: assignments,
        name: "Assignment",
        label: "作业",
        record: Assignment,
        into_record: into_assignment,
        where_input: AssignmentWhereInput,
        where_unique: AssignmentWhereUniqueInput,
        create: AssignmentCreateInput,
        update: AssignmentUpdateInput,
        include: AssignmentInclude,
        with_relations: AssignmentWithRelations,
        numeric: [Id, SubjectId, TeacherId, MaxScore],
    }
}

impl WhereInput for AssignmentWhereInput {
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
        if let Some(ref f) = self.due_date {
            cond = cond.add(f.to_condition(Column::DueDate));
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

impl AssignmentWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            AssignmentWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl AssignmentCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("title", &self.title).map_err(SchoolError::validation)?;
        validate_non_negative("max_score", self.max_score).map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            subject_id: Set(self.subject_id),
            teacher_id: Set(self.teacher_id),
            title: Set(self.title),
            description: Set(self.description),
            due_date: Set(self.due_date.timestamp()),
            max_score: Set(self.max_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl AssignmentUpdateInput {
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
        if let Some(due_date) = self.due_date {
            model.due_date = Set(due_date.timestamp());
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

impl AssignmentInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        assignments: Vec<Assignment>,
    ) -> Result<Vec<AssignmentWithRelations>> {
        let subjects = if self.subject {
            Some(
                load_one::<subjects::Entity, _, _>(
                    db,
                    subjects::Column::Id,
                    assignments.iter().map(|a| a.subject_id),
                    |m| m.id,
                    |m| m.into_subject(),
                    "assignments.subject",
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
                    assignments.iter().map(|a| a.teacher_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "assignments.teacher",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(assignments
            .into_iter()
            .map(|assignment| AssignmentWithRelations {
                subject: subjects
                    .as_ref()
                    .and_then(|m| m.get(&assignment.subject_id).cloned()),
                teacher: teachers
                    .as_ref()
                    .and_then(|m| m.get(&assignment.teacher_id).cloned()),
                assignment,
            })
            .collect())
    }
}

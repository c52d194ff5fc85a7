use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::enrollments::{ActiveModel, Column};
use crate::entity::{classes, users};
use crate::errors::Result;
use crate::models::common::{WhereInput, combine_logical};
use crate::models::enrollments::entities::Enrollment;
use crate::models::enrollments::requests::{
    EnrollmentCreateInput, EnrollmentInclude, EnrollmentUpdateInput, EnrollmentWhereInput,
    EnrollmentWhereUniqueInput,
};
use crate::models::enrollments::responses::EnrollmentWithRelations;

define_delegate! {
    /// 选课委托
    EnrollmentDelegate {
        module: enrollments,
        name: "Enrollment",
        label: "选课记录",
        record: Enrollment,
        into_record: into_enrollment,
        where_input: EnrollmentWhereInput,
        where_unique: EnrollmentWhereUniqueInput,
        create: EnrollmentCreateInput,
        update: EnrollmentUpdateInput,
        include: EnrollmentInclude,
        with_relations: EnrollmentWithRelations,
        numeric: [Id, ClassId, StudentId, EnrolledAt],
    }
}

impl WhereInput for EnrollmentWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.class_id {
            cond = cond.add(f.to_condition(Column::ClassId));
        }
        if let Some(ref f) = self.student_id {
            cond = cond.add(f.to_condition(Column::StudentId));
        }
        if let Some(ref f) = self.enrolled_at {
            cond = cond.add(f.to_condition(Column::EnrolledAt));
        }
        if let Some(ref f) = self.class {
            cond = cond.add(f.to_condition(Column::ClassId, classes::Column::Id));
        }
        if let Some(ref f) = self.student {
            cond = cond.add(f.to_condition(Column::StudentId, users::Column::Id));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl EnrollmentWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            EnrollmentWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
            EnrollmentWhereUniqueInput::ClassIdStudentId {
                class_id,
                student_id,
            } => Condition::all()
                .add(Column::ClassId.eq(*class_id))
                .add(Column::StudentId.eq(*student_id)),
        }
    }
}

impl EnrollmentCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        Ok(ActiveModel {
            class_id: Set(self.class_id),
            student_id: Set(self.student_id),
            enrolled_at: Set(self.enrolled_at.map_or(now, |d| d.timestamp())),
            ..Default::default()
        })
    }
}

impl EnrollmentUpdateInput {
    // 选课记录没有 updated_at 列
    pub(crate) fn into_active_model(self, _now: i64) -> Result<ActiveModel> {
        let mut model = <ActiveModel as Default>::default();

        if let Some(class_id) = self.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(student_id) = self.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(enrolled_at) = self.enrolled_at {
            model.enrolled_at = Set(enrolled_at.timestamp());
        }
        Ok(model)
    }
}

impl EnrollmentInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        enrollments: Vec<Enrollment>,
    ) -> Result<Vec<EnrollmentWithRelations>> {
        let classes = if self.class {
            Some(
                load_one::<classes::Entity, _, _>(
                    db,
                    classes::Column::Id,
                    enrollments.iter().map(|e| e.class_id),
                    |m| m.id,
                    |m| m.into_class(),
                    "enrollments.class",
                )
                .await?,
            )
        } else {
            None
        };
        let students = if self.student {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    enrollments.iter().map(|e| e.student_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "enrollments.student",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(enrollments
            .into_iter()
            .map(|enrollment| EnrollmentWithRelations {
                class: classes
                    .as_ref()
                    .and_then(|m| m.get(&enrollment.class_id).cloned()),
                student: students
                    .as_ref()
                    .and_then(|m| m.get(&enrollment.student_id).cloned()),
                enrollment,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::models::common::{
        CreateManyArgs, DateTimeFilter, FindManyArgs, RelationFilter, StringFilter,
    };
    use crate::models::enrollments::requests::*;
    use crate::models::users::entities::Role;
    use crate::models::users::requests::UserWhereInput;
    use crate::testing::{memory_client, seed_class, seed_user};

    #[tokio::test]
    async fn test_compound_unique_key() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "teacher", Role::Teacher).await;
        let student = seed_user(&client, "student", Role::Student).await;
        let class = seed_class(&client, teacher.id, "6A").await;

        let enrolled_at = Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap();
        let mut input = EnrollmentCreateInput::new(class.id, student.id);
        input.enrolled_at = Some(enrolled_at);
        let enrollment = client.enrollment().create(input).await.unwrap();
        assert_eq!(enrollment.enrolled_at, enrolled_at);

        let found = client
            .enrollment()
            .find_unique(EnrollmentWhereUniqueInput::ClassIdStudentId {
                class_id: class.id,
                student_id: student.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, enrollment.id);

        let err = client
            .enrollment()
            .create(EnrollmentCreateInput::new(class.id, student.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_enrolled_at_defaults_to_now() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "tdef", Role::Teacher).await;
        let student = seed_user(&client, "sdef", Role::Student).await;
        let class = seed_class(&client, teacher.id, "6B").await;

        let before = Utc::now().timestamp();
        let enrollment = client
            .enrollment()
            .create(EnrollmentCreateInput::new(class.id, student.id))
            .await
            .unwrap();
        assert!(enrollment.enrolled_at.timestamp() >= before);

        let recent = client
            .enrollment()
            .count(Some(EnrollmentWhereInput {
                enrolled_at: Some(DateTimeFilter::gte(Utc.timestamp_opt(before, 0).unwrap())),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(recent, 1);
    }

    #[tokio::test]
    async fn test_skip_duplicates_on_compound_key() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "tdup", Role::Teacher).await;
        let a = seed_user(&client, "sdup1", Role::Student).await;
        let b = seed_user(&client, "sdup2", Role::Student).await;
        let class = seed_class(&client, teacher.id, "6C").await;
        client
            .enrollment()
            .create(EnrollmentCreateInput::new(class.id, a.id))
            .await
            .unwrap();

        let payload = client
            .enrollment()
            .create_many(
                CreateManyArgs::new(vec![
                    EnrollmentCreateInput::new(class.id, a.id),
                    EnrollmentCreateInput::new(class.id, b.id),
                ])
                .skip_duplicates(),
            )
            .await
            .unwrap();
        assert_eq!(payload.count, 1);
        assert_eq!(client.enrollment().count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_include_student_and_filter_by_student() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "tinc", Role::Teacher).await;
        let mia = seed_user(&client, "mia", Role::Student).await;
        let noah = seed_user(&client, "noah", Role::Student).await;
        let class = seed_class(&client, teacher.id, "6D").await;
        for student in [&mia, &noah] {
            client
                .enrollment()
                .create(EnrollmentCreateInput::new(class.id, student.id))
                .await
                .unwrap();
        }

        let found = client
            .enrollment()
            .find_many(
                FindManyArgs::new()
                    .filter(EnrollmentWhereInput {
                        student: Some(RelationFilter::is(UserWhereInput {
                            username: Some(StringFilter::equals("noah")),
                            ..Default::default()
                        })),
                        ..Default::default()
                    })
                    .include(EnrollmentInclude {
                        student: true,
                        class: true,
                    }),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].student.as_ref().map(|s| s.id), Some(noah.id));
        assert_eq!(found[0].class.as_ref().map(|c| c.name.as_str()), Some("6D"));
    }
}

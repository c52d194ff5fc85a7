use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_one;
use crate::entity::attendances::{ActiveModel, Column};
use crate::entity::{classes, users};
use crate::errors::Result;
use crate::models::attendances::entities::Attendance;
use crate::models::attendances::requests::{
    AttendanceCreateInput, AttendanceInclude, AttendanceUpdateInput, AttendanceWhereInput,
    AttendanceWhereUniqueInput,
};
use crate::models::attendances::responses::AttendanceWithRelations;
use crate::models::common::{WhereInput, combine_logical};

define_delegate! {
    /// 考勤委托
    AttendanceDelegate {
        module: attendances,
        name: "Attendance",
        label: "考勤记录",
        record: Attendance,
        into_record: into_attendance,
        where_input: AttendanceWhereInput,
        where_unique: AttendanceWhereUniqueInput,
        create: AttendanceCreateInput,
        update: AttendanceUpdateInput,
        include: AttendanceInclude,
        with_relations: AttendanceWithRelations,
        numeric: [Id, StudentId, ClassId],
    }
}

impl WhereInput for AttendanceWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.student_id {
            cond = cond.add(f.to_condition(Column::StudentId));
        }
        if let Some(ref f) = self.class_id {
            cond = cond.add(f.to_condition(Column::ClassId));
        }
        if let Some(ref f) = self.date {
            cond = cond.add(f.to_condition(Column::Date));
        }
        if let Some(ref f) = self.status {
            cond = cond.add(f.to_condition(Column::Status));
        }
        if let Some(ref f) = self.remarks {
            cond = cond.add(f.to_condition(Column::Remarks));
        }
        if let Some(ref f) = self.created_at {
            cond = cond.add(f.to_condition(Column::CreatedAt));
        }
        if let Some(ref f) = self.updated_at {
            cond = cond.add(f.to_condition(Column::UpdatedAt));
        }
        if let Some(ref f) = self.student {
            cond = cond.add(f.to_condition(Column::StudentId, users::Column::Id));
        }
        if let Some(ref f) = self.class {
            cond = cond.add(f.to_condition(Column::ClassId, classes::Column::Id));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl AttendanceWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            AttendanceWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
            AttendanceWhereUniqueInput::StudentIdClassIdDate {
                student_id,
                class_id,
                date,
            } => Condition::all()
                .add(Column::StudentId.eq(*student_id))
                .add(Column::ClassId.eq(*class_id))
                .add(Column::Date.eq(date.timestamp())),
        }
    }
}

impl AttendanceCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        Ok(ActiveModel {
            student_id: Set(self.student_id),
            class_id: Set(self.class_id),
            date: Set(self.date.timestamp()),
            status: Set(self.status.to_string()),
            remarks: Set(self.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl AttendanceUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(student_id) = self.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(class_id) = self.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(date) = self.date {
            model.date = Set(date.timestamp());
        }
        if let Some(status) = self.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = self.remarks {
            model.remarks = Set(remarks);
        }

        if model.is_changed() {
            model.updated_at = Set(now);
        }
        Ok(model)
    }
}

impl AttendanceInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        attendances: Vec<Attendance>,
    ) -> Result<Vec<AttendanceWithRelations>> {
        let students = if self.student {
            Some(
                load_one::<users::Entity, _, _>(
                    db,
                    users::Column::Id,
                    attendances.iter().map(|a| a.student_id),
                    |m| m.id,
                    |m| m.into_user(),
                    "attendances.student",
                )
                .await?,
            )
        } else {
            None
        };
        let classes = if self.class {
            Some(
                load_one::<classes::Entity, _, _>(
                    db,
                    classes::Column::Id,
                    attendances.iter().map(|a| a.class_id),
                    |m| m.id,
                    |m| m.into_class(),
                    "attendances.class",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(attendances
            .into_iter()
            .map(|attendance| AttendanceWithRelations {
                student: students
                    .as_ref()
                    .and_then(|m| m.get(&attendance.student_id).cloned()),
                class: classes
                    .as_ref()
                    .and_then(|m| m.get(&attendance.class_id).cloned()),
                attendance,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::entity::attendances::Column;
    use crate::models::attendances::entities::AttendanceStatus;
    use crate::models::attendances::requests::*;
    use crate::models::common::{EnumFilter, GroupByArgs, UpsertArgs};
    use crate::models::users::entities::Role;
    use crate::testing::{memory_client, seed_class, seed_user};

    #[tokio::test]
    async fn test_upsert_by_student_class_date() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "roll", Role::Teacher).await;
        let student = seed_user(&client, "tardy", Role::Student).await;
        let class = seed_class(&client, teacher.id, "3C").await;
        let day = Utc.with_ymd_and_hms(2024, 11, 4, 0, 0, 0).unwrap();

        let args = |status| {
            UpsertArgs::new(
                AttendanceWhereUniqueInput::StudentIdClassIdDate {
                    student_id: student.id,
                    class_id: class.id,
                    date: day,
                },
                AttendanceCreateInput::new(student.id, class.id, day, status),
                AttendanceUpdateInput {
                    status: Some(status),
                    remarks: Some(Some("bus delay".into())),
                    ..Default::default()
                },
            )
        };

        let first = client
            .attendance()
            .upsert(args(AttendanceStatus::Present))
            .await
            .unwrap();
        assert_eq!(first.status, AttendanceStatus::Present);
        assert_eq!(first.remarks, None);

        let second = client
            .attendance()
            .upsert(args(AttendanceStatus::Late))
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, AttendanceStatus::Late);
        assert_eq!(second.remarks.as_deref(), Some("bus delay"));
    }

    #[tokio::test]
    async fn test_status_filter_and_group_by() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "checker", Role::Teacher).await;
        let class = seed_class(&client, teacher.id, "3D").await;
        let day = Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap();

        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Excused,
        ];
        for (i, status) in statuses.into_iter().enumerate() {
            let student = seed_user(&client, &format!("pupil{i}"), Role::Student).await;
            client
                .attendance()
                .create(AttendanceCreateInput::new(student.id, class.id, day, status))
                .await
                .unwrap();
        }

        let missing = client
            .attendance()
            .count(Some(AttendanceWhereInput {
                status: Some(EnumFilter::in_list([
                    AttendanceStatus::Absent,
                    AttendanceStatus::Excused,
                ])),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(missing, 2);

        let rows = client
            .attendance()
            .group_by(GroupByArgs::new(vec![Column::Status]).count())
            .await
            .unwrap();
        let present = rows
            .iter()
            .find(|r| r.key("status") == Some(&serde_json::json!("PRESENT")))
            .unwrap();
        assert_eq!(present.aggregates.count, Some(2));
        assert_eq!(rows.len(), 3);
    }
}

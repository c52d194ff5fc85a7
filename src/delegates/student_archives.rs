use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction,
    TransactionTrait,
};

use crate::entity::student_archives::{ActiveModel, Column};
use crate::entity::{classes, enrollments, student_parent_relations, users};
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::student_archives::entities::StudentArchive;
use crate::models::student_archives::requests::{
    ArchiveStudentInput, StudentArchiveCreateInput, StudentArchiveInclude,
    StudentArchiveUpdateInput, StudentArchiveWhereInput, StudentArchiveWhereUniqueInput,
};
use crate::models::student_archives::responses::StudentArchiveWithRelations;
use crate::utils::validate::{validate_email, validate_required};

define_delegate! {
    /// 学生档案委托
    StudentArchiveDelegate {
        module: student_archives,
        name: "StudentArchive",
        label: "学生档案",
        record: StudentArchive,
        into_record: into_student_archive,
        where_input: StudentArchiveWhereInput,
        where_unique: StudentArchiveWhereUniqueInput,
        create: StudentArchiveCreateInput,
        update: StudentArchiveUpdateInput,
        include: StudentArchiveInclude,
        with_relations: StudentArchiveWithRelations,
        numeric: [Id, StudentId, GradeLevel],
    }
}

impl WhereInput for StudentArchiveWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(ref f) = self.student_id {
            cond = cond.add(f.to_condition(Column::StudentId));
        }
        if let Some(ref f) = self.username {
            cond = cond.add(f.to_condition(Column::Username));
        }
        if let Some(ref f) = self.email {
            cond = cond.add(f.to_condition(Column::Email));
        }
        if let Some(ref f) = self.first_name {
            cond = cond.add(f.to_condition(Column::FirstName));
        }
        if let Some(ref f) = self.last_name {
            cond = cond.add(f.to_condition(Column::LastName));
        }
        if let Some(ref f) = self.gender {
            cond = cond.add(f.to_condition(Column::Gender));
        }
        if let Some(ref f) = self.birth_date {
            cond = cond.add(f.to_condition(Column::BirthDate));
        }
        if let Some(ref f) = self.class_name {
            cond = cond.add(f.to_condition(Column::ClassName));
        }
        if let Some(ref f) = self.grade_level {
            cond = cond.add(f.to_condition(Column::GradeLevel));
        }
        if let Some(ref f) = self.academic_year {
            cond = cond.add(f.to_condition(Column::AcademicYear));
        }
        if let Some(ref f) = self.teacher_name {
            cond = cond.add(f.to_condition(Column::TeacherName));
        }
        if let Some(ref f) = self.parent_name {
            cond = cond.add(f.to_condition(Column::ParentName));
        }
        if let Some(ref f) = self.parent_email {
            cond = cond.add(f.to_condition(Column::ParentEmail));
        }
        if let Some(ref f) = self.parent_phone {
            cond = cond.add(f.to_condition(Column::ParentPhone));
        }
        if let Some(ref f) = self.reason {
            cond = cond.add(f.to_condition(Column::Reason));
        }
        if let Some(ref f) = self.archived_at {
            cond = cond.add(f.to_condition(Column::ArchivedAt));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl StudentArchiveWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            StudentArchiveWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
        }
    }
}

impl StudentArchiveCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_required("username", &self.username).map_err(SchoolError::validation)?;
        validate_email(&self.email).map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            student_id: Set(self.student_id),
            username: Set(self.username),
            email: Set(self.email),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            gender: Set(self.gender.map(|g| g.to_string())),
            birth_date: Set(self.birth_date.map(|d| d.timestamp())),
            class_name: Set(self.class_name),
            grade_level: Set(self.grade_level),
            academic_year: Set(self.academic_year),
            teacher_name: Set(self.teacher_name),
            parent_name: Set(self.parent_name),
            parent_email: Set(self.parent_email),
            parent_phone: Set(self.parent_phone),
            reason: Set(self.reason),
            extra: Set(self.extra),
            archived_at: Set(self.archived_at.map_or(now, |d| d.timestamp())),
            ..Default::default()
        })
    }
}

impl StudentArchiveUpdateInput {
    // 快照本身不可变，只允许补充原因、备注与家长联系方式
    pub(crate) fn into_active_model(self, _now: i64) -> Result<ActiveModel> {
        let mut model = <ActiveModel as Default>::default();

        if let Some(reason) = self.reason {
            model.reason = Set(reason);
        }
        if let Some(extra) = self.extra {
            model.extra = Set(extra);
        }
        if let Some(parent_name) = self.parent_name {
            model.parent_name = Set(parent_name);
        }
        if let Some(parent_email) = self.parent_email {
            if let Some(ref email) = parent_email {
                validate_email(email).map_err(SchoolError::validation)?;
            }
            model.parent_email = Set(parent_email);
        }
        if let Some(parent_phone) = self.parent_phone {
            model.parent_phone = Set(parent_phone);
        }
        Ok(model)
    }
}

impl StudentArchiveInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        _db: &C,
        archives: Vec<StudentArchive>,
    ) -> Result<Vec<StudentArchiveWithRelations>> {
        Ok(archives
            .into_iter()
            .map(StudentArchiveWithRelations::from)
            .collect())
    }
}

impl<'a, C> StudentArchiveDelegate<'a, C>
where
    C: ConnectionTrait + TransactionTrait<Transaction = DatabaseTransaction>,
{
    /// 归档学生
    ///
    /// 在同一事务内读取学生、最早的入班记录及其班主任、第一位家长，
    /// 写入扁平化快照；`remove_student` 时随后删除学生（级联清理入班、考勤、家长关系）。
    pub async fn archive_student(&self, input: ArchiveStudentInput) -> Result<StudentArchive> {
        use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder};

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::transaction(format!("开启归档事务失败: {e}")))?;

        let student = users::Entity::find_by_id(input.student_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db_err("查询学生失败", e))?
            .ok_or_else(|| {
                SchoolError::record_not_found(format!("No User found for id {}", input.student_id))
            })?
            .into_user();
        if !student.is_student() {
            return Err(SchoolError::validation(format!(
                "User {} is not a student",
                student.id
            )));
        }

        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student.id))
            .order_by_asc(enrollments::Column::EnrolledAt)
            .order_by_asc(enrollments::Column::Id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db_err("查询入班记录失败", e))?;

        let class = match enrollment {
            Some(enrollment) => classes::Entity::find_by_id(enrollment.class_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolError::from_db_err("查询班级失败", e))?,
            None => None,
        };
        let teacher = match class {
            Some(ref class) => users::Entity::find_by_id(class.teacher_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolError::from_db_err("查询班主任失败", e))?,
            None => None,
        };

        let relation = student_parent_relations::Entity::find()
            .filter(student_parent_relations::Column::StudentId.eq(student.id))
            .order_by_asc(student_parent_relations::Column::Id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db_err("查询家长关系失败", e))?;
        let parent = match relation {
            Some(relation) => users::Entity::find_by_id(relation.parent_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolError::from_db_err("查询家长失败", e))?,
            None => None,
        };

        let mut snapshot = StudentArchiveCreateInput::new(
            student.id,
            student.username.clone(),
            student.email.clone(),
            student.first_name.clone(),
            student.last_name.clone(),
        );
        snapshot.gender = student.gender;
        snapshot.birth_date = student.birth_date;
        if let Some(class) = class {
            snapshot.class_name = Some(class.name);
            snapshot.grade_level = Some(class.grade_level);
            snapshot.academic_year = Some(class.academic_year);
        }
        snapshot.teacher_name = teacher.map(|t| t.into_user().full_name());
        if let Some(parent) = parent.map(|p| p.into_user()) {
            snapshot.parent_name = Some(parent.full_name());
            snapshot.parent_email = Some(parent.email);
            snapshot.parent_phone = parent.phone;
        }
        snapshot.reason = input.reason;
        snapshot.extra = input.extra;

        let archive = snapshot
            .into_active_model(crate::utils::now_timestamp())?
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::from_db_err("写入学生档案失败", e))?;

        if input.remove_student {
            users::Entity::delete_by_id(student.id)
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::from_db_err("删除学生失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::transaction(format!("提交归档事务失败: {e}")))?;

        tracing::info!(
            student_id = student.id,
            archive_id = archive.id,
            removed = input.remove_student,
            "学生已归档"
        );
        Ok(archive.into_student_archive())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::enrollments::requests::EnrollmentCreateInput;
    use crate::models::student_archives::requests::*;
    use crate::models::student_parent_relations::requests::StudentParentRelationCreateInput;
    use crate::models::users::entities::Role;
    use crate::models::users::requests::{UserUpdateInput, UserWhereUniqueInput};
    use crate::testing::{memory_client, seed_class, seed_user};

    #[tokio::test]
    async fn test_archive_snapshot_and_remove_student() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "mentor", Role::Teacher).await;
        let student = seed_user(&client, "leaver", Role::Student).await;
        let parent = seed_user(&client, "carer", Role::Parent).await;
        client
            .user()
            .update(
                UserWhereUniqueInput::Id(parent.id),
                UserUpdateInput {
                    phone: Some(Some("555-0142".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let class = seed_class(&client, teacher.id, "8E").await;
        client
            .enrollment()
            .create(EnrollmentCreateInput::new(class.id, student.id))
            .await
            .unwrap();
        client
            .student_parent_relation()
            .create(StudentParentRelationCreateInput::new(student.id, parent.id))
            .await
            .unwrap();

        let archive = client
            .student_archive()
            .archive_student(
                ArchiveStudentInput::new(student.id)
                    .reason("Transferred")
                    .extra(serde_json::json!({ "destination": "North High" }))
                    .remove_student(),
            )
            .await
            .unwrap();

        assert_eq!(archive.username, "leaver");
        assert_eq!(archive.class_name.as_deref(), Some("8E"));
        assert_eq!(archive.academic_year.as_deref(), Some("2024-2025"));
        assert_eq!(archive.teacher_name, Some(teacher.full_name()));
        assert_eq!(archive.parent_email.as_deref(), Some(parent.email.as_str()));
        assert_eq!(archive.parent_phone.as_deref(), Some("555-0142"));
        assert_eq!(archive.extra.as_ref().unwrap()["destination"], "North High");

        assert!(
            client
                .user()
                .find_unique(UserWhereUniqueInput::Id(student.id))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(client.enrollment().count(None).await.unwrap(), 0);
        assert_eq!(client.student_parent_relation().count(None).await.unwrap(), 0);
        assert_eq!(client.student_archive().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_archive_without_class_keeps_student() {
        let client = memory_client().await;
        let student = seed_user(&client, "loner", Role::Student).await;

        let archive = client
            .student_archive()
            .archive_student(ArchiveStudentInput::new(student.id))
            .await
            .unwrap();
        assert_eq!(archive.class_name, None);
        assert_eq!(archive.parent_name, None);
        assert_eq!(client.user().count(None).await.unwrap(), 1);

        let updated = client
            .student_archive()
            .update(
                StudentArchiveWhereUniqueInput::Id(archive.id),
                StudentArchiveUpdateInput {
                    reason: Some(Some("Graduated".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.reason.as_deref(), Some("Graduated"));
    }

    #[tokio::test]
    async fn test_archive_rejects_non_students_and_rolls_back() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "staff", Role::Teacher).await;

        let err = client
            .student_archive()
            .archive_student(ArchiveStudentInput::new(teacher.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = client
            .student_archive()
            .archive_student(ArchiveStudentInput::new(4242))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(client.student_archive().count(None).await.unwrap(), 0);
    }
}

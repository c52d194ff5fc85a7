use sea_orm::{ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait};

use super::relations::load_many;
use crate::entity::users::{ActiveModel, Column};
use crate::entity::{
    assignments, attendances, classes, enrollments, exams, student_parent_relations, subjects,
};
use crate::errors::{Result, SchoolError};
use crate::models::common::{WhereInput, combine_logical};
use crate::models::users::entities::User;
use crate::models::users::requests::{
    UserCreateInput, UserInclude, UserUpdateInput, UserWhereInput, UserWhereUniqueInput,
};
use crate::models::users::responses::UserWithRelations;
use crate::utils::validate::{validate_email, validate_required, validate_username};

define_delegate! {
    /// 用户委托
    UserDelegate {
        module: users,
        name: "User",
        label: "用户",
        record: User,
        into_record: into_user,
        where_input: UserWhereInput,
        where_unique: UserWhereUniqueInput,
        create: UserCreateInput,
        update: UserUpdateInput,
        include: UserInclude,
        with_relations: UserWithRelations,
        numeric: [Id],
    }
}

impl WhereInput for UserWhereInput {
    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref f) = self.id {
            cond = cond.add(f.to_condition(Column::Id));
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
        if let Some(ref f) = self.role {
            cond = cond.add(f.to_condition(Column::Role));
        }
        if let Some(ref f) = self.gender {
            cond = cond.add(f.to_condition(Column::Gender));
        }
        if let Some(ref f) = self.birth_date {
            cond = cond.add(f.to_condition(Column::BirthDate));
        }
        if let Some(ref f) = self.phone {
            cond = cond.add(f.to_condition(Column::Phone));
        }
        if let Some(ref f) = self.address {
            cond = cond.add(f.to_condition(Column::Address));
        }
        if let Some(ref f) = self.avatar_url {
            cond = cond.add(f.to_condition(Column::AvatarUrl));
        }
        if let Some(ref f) = self.created_at {
            cond = cond.add(f.to_condition(Column::CreatedAt));
        }
        if let Some(ref f) = self.updated_at {
            cond = cond.add(f.to_condition(Column::UpdatedAt));
        }

        // 关联过滤
        if let Some(ref f) = self.classes_taught {
            cond = cond.add(f.to_condition(Column::Id, classes::Column::TeacherId));
        }
        if let Some(ref f) = self.subjects_taught {
            cond = cond.add(f.to_condition(Column::Id, subjects::Column::TeacherId));
        }
        if let Some(ref f) = self.assignments {
            cond = cond.add(f.to_condition(Column::Id, assignments::Column::TeacherId));
        }
        if let Some(ref f) = self.exams {
            cond = cond.add(f.to_condition(Column::Id, exams::Column::TeacherId));
        }
        if let Some(ref f) = self.enrollments {
            cond = cond.add(f.to_condition(Column::Id, enrollments::Column::StudentId));
        }
        if let Some(ref f) = self.attendances {
            cond = cond.add(f.to_condition(Column::Id, attendances::Column::StudentId));
        }
        if let Some(ref f) = self.parents {
            let child_key = student_parent_relations::Column::StudentId;
            cond = cond.add(f.to_condition(Column::Id, child_key));
        }
        if let Some(ref f) = self.children {
            let child_key = student_parent_relations::Column::ParentId;
            cond = cond.add(f.to_condition(Column::Id, child_key));
        }

        combine_logical(cond, &self.and, self.or.as_deref(), &self.not)
    }
}

impl UserWhereUniqueInput {
    pub fn to_condition(&self) -> Condition {
        match self {
            UserWhereUniqueInput::Id(id) => Condition::all().add(Column::Id.eq(*id)),
            UserWhereUniqueInput::Username(username) => {
                Condition::all().add(Column::Username.eq(username.as_str()))
            }
            UserWhereUniqueInput::Email(email) => {
                Condition::all().add(Column::Email.eq(email.as_str()))
            }
        }
    }
}

impl UserCreateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        validate_username(&self.username).map_err(SchoolError::validation)?;
        validate_email(&self.email).map_err(SchoolError::validation)?;
        validate_required("password_hash", &self.password_hash).map_err(SchoolError::validation)?;
        validate_required("first_name", &self.first_name).map_err(SchoolError::validation)?;
        validate_required("last_name", &self.last_name).map_err(SchoolError::validation)?;

        Ok(ActiveModel {
            username: Set(self.username),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            role: Set(self.role.to_string()),
            gender: Set(self.gender.map(|g| g.to_string())),
            birth_date: Set(self.birth_date.map(|d| d.timestamp())),
            phone: Set(self.phone),
            address: Set(self.address),
            avatar_url: Set(self.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

impl UserUpdateInput {
    pub(crate) fn into_active_model(self, now: i64) -> Result<ActiveModel> {
        use sea_orm::ActiveModelTrait;

        let mut model = <ActiveModel as Default>::default();

        if let Some(username) = self.username {
            validate_username(&username).map_err(SchoolError::validation)?;
            model.username = Set(username);
        }
        if let Some(email) = self.email {
            validate_email(&email).map_err(SchoolError::validation)?;
            model.email = Set(email);
        }
        if let Some(password_hash) = self.password_hash {
            validate_required("password_hash", &password_hash).map_err(SchoolError::validation)?;
            model.password_hash = Set(password_hash);
        }
        if let Some(first_name) = self.first_name {
            validate_required("first_name", &first_name).map_err(SchoolError::validation)?;
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = self.last_name {
            validate_required("last_name", &last_name).map_err(SchoolError::validation)?;
            model.last_name = Set(last_name);
        }
        if let Some(role) = self.role {
            model.role = Set(role.to_string());
        }
        if let Some(gender) = self.gender {
            model.gender = Set(gender.map(|g| g.to_string()));
        }
        if let Some(birth_date) = self.birth_date {
            model.birth_date = Set(birth_date.map(|d| d.timestamp()));
        }
        if let Some(phone) = self.phone {
            model.phone = Set(phone);
        }
        if let Some(address) = self.address {
            model.address = Set(address);
        }
        if let Some(avatar_url) = self.avatar_url {
            model.avatar_url = Set(avatar_url);
        }

        if model.is_changed() {
            model.updated_at = Set(now);
        }
        Ok(model)
    }
}

impl UserInclude {
    pub(crate) async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        users: Vec<User>,
    ) -> Result<Vec<UserWithRelations>> {
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();

        let mut classes_taught = if self.classes_taught {
            Some(
                load_many::<classes::Entity, _, _>(
                    db,
                    classes::Column::TeacherId,
                    classes::Column::Id,
                    ids.iter().copied(),
                    |m| m.teacher_id,
                    |m| m.into_class(),
                    "users.classes_taught",
                )
                .await?,
            )
        } else {
            None
        };
        let mut subjects_taught = if self.subjects_taught {
            Some(
                load_many::<subjects::Entity, _, _>(
                    db,
                    subjects::Column::TeacherId,
                    subjects::Column::Id,
                    ids.iter().copied(),
                    |m| m.teacher_id,
                    |m| m.into_subject(),
                    "users.subjects_taught",
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
                    assignments::Column::TeacherId,
                    assignments::Column::Id,
                    ids.iter().copied(),
                    |m| m.teacher_id,
                    |m| m.into_assignment(),
                    "users.assignments",
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
                    exams::Column::TeacherId,
                    exams::Column::Id,
                    ids.iter().copied(),
                    |m| m.teacher_id,
                    |m| m.into_exam(),
                    "users.exams",
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
                    enrollments::Column::StudentId,
                    enrollments::Column::Id,
                    ids.iter().copied(),
                    |m| m.student_id,
                    |m| m.into_enrollment(),
                    "users.enrollments",
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
                    attendances::Column::StudentId,
                    attendances::Column::Id,
                    ids.iter().copied(),
                    |m| m.student_id,
                    |m| m.into_attendance(),
                    "users.attendances",
                )
                .await?,
            )
        } else {
            None
        };
        let mut parents = if self.parents {
            Some(
                load_many::<student_parent_relations::Entity, _, _>(
                    db,
                    student_parent_relations::Column::StudentId,
                    student_parent_relations::Column::Id,
                    ids.iter().copied(),
                    |m| m.student_id,
                    |m| m.into_student_parent_relation(),
                    "users.parents",
                )
                .await?,
            )
        } else {
            None
        };
        let mut children = if self.children {
            Some(
                load_many::<student_parent_relations::Entity, _, _>(
                    db,
                    student_parent_relations::Column::ParentId,
                    student_parent_relations::Column::Id,
                    ids.iter().copied(),
                    |m| m.parent_id,
                    |m| m.into_student_parent_relation(),
                    "users.children",
                )
                .await?,
            )
        } else {
            None
        };

        Ok(users
            .into_iter()
            .map(|user| {
                let id = user.id;
                UserWithRelations {
                    classes_taught: classes_taught
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    subjects_taught: subjects_taught
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    assignments: assignments
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    exams: exams.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    enrollments: enrollments
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    attendances: attendances
                        .as_mut()
                        .map(|m| m.remove(&id).unwrap_or_default()),
                    parents: parents.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    children: children.as_mut().map(|m| m.remove(&id).unwrap_or_default()),
                    user,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::common::{
        AggregateArgs, CreateManyArgs, EnumFilter, FindManyArgs, FindUniqueArgs,
        ListRelationFilter, OrderByInput, StringFilter, UpsertArgs,
    };
    use crate::models::classes::requests::ClassWhereInput;
    use crate::models::users::entities::{Gender, Role};
    use crate::models::users::requests::*;
    use crate::models::users::responses::UserWithRelations;
    use crate::entity::users::Column;
    use crate::testing::{memory_client, seed_class, seed_user};

    #[tokio::test]
    async fn test_create_and_find_unique_by_each_key() {
        let client = memory_client().await;
        let created = client
            .user()
            .create(
                UserCreateInput::new(
                    "ada",
                    "ada@school.edu",
                    "hash",
                    "Ada",
                    "Lovelace",
                    Role::Teacher,
                )
                .gender(Gender::Female)
                .phone("555-0100"),
            )
            .await
            .unwrap();
        assert_eq!(created.role, Role::Teacher);
        assert_eq!(created.gender, Some(Gender::Female));
        assert_eq!(created.created_at, created.updated_at);

        for key in [
            UserWhereUniqueInput::Id(created.id),
            UserWhereUniqueInput::Username("ada".into()),
            UserWhereUniqueInput::Email("ada@school.edu".into()),
        ] {
            let found = client.user().find_unique(key).await.unwrap().unwrap();
            assert_eq!(found.id, created.id);
            assert_eq!(found.full_name(), "Ada Lovelace");
        }

        assert!(
            client
                .user()
                .find_unique(UserWhereUniqueInput::Username("nobody".into()))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_or_throw_reports_not_found() {
        let client = memory_client().await;
        let err = client
            .user()
            .find_unique_or_throw(UserWhereUniqueInput::Id(404))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = client
            .user()
            .find_first_or_throw(FindManyArgs::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_input_before_sql() {
        let client = memory_client().await;
        let err = client
            .user()
            .create(UserCreateInput::new("ab", "ab@school.edu", "hash", "A", "B", Role::Student))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = client
            .user()
            .create(UserCreateInput::new("abc", "nope", "hash", "A", "B", Role::Student))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(client.user().count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_unique_constraint() {
        let client = memory_client().await;
        seed_user(&client, "grace", Role::Teacher).await;
        let err = client
            .user()
            .create(UserCreateInput::new(
                "grace",
                "other@school.edu",
                "hash",
                "Grace",
                "Hopper",
                Role::Teacher,
            ))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_find_many_filters_orders_and_windows() {
        let client = memory_client().await;
        for name in ["carol", "alice", "bob", "dave"] {
            seed_user(&client, name, Role::Student).await;
        }
        seed_user(&client, "tina", Role::Teacher).await;

        let students = client
            .user()
            .find_many(
                FindManyArgs::new()
                    .filter(UserWhereInput {
                        role: Some(EnumFilter::equals(Role::Student)),
                        ..Default::default()
                    })
                    .order_by(OrderByInput::asc(Column::Username))
                    .skip(1)
                    .take(2),
            )
            .await
            .unwrap();
        let names: Vec<_> = students.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["bob", "carol"]);

        let insensitive = client
            .user()
            .count(Some(UserWhereInput {
                username: Some(StringFilter::starts_with("A").insensitive()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(insensitive, 1);
    }

    #[tokio::test]
    async fn test_cursor_starts_at_record() {
        let client = memory_client().await;
        let mut ids = Vec::new();
        for name in ["u001", "u002", "u003", "u004"] {
            ids.push(seed_user(&client, name, Role::Student).await.id);
        }

        let page = client
            .user()
            .find_many(FindManyArgs::new().cursor(ids[1]).take(2))
            .await
            .unwrap();
        let got: Vec<_> = page.iter().map(|u| u.id).collect();
        assert_eq!(got, vec![ids[1], ids[2]]);

        let skipped = client
            .user()
            .find_many(FindManyArgs::new().cursor(ids[1]).skip(1).take(5))
            .await
            .unwrap();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].id, ids[2]);
    }

    #[tokio::test]
    async fn test_cursor_follows_non_primary_ordering() {
        let client = memory_client().await;
        let mut ids = Vec::new();
        for name in ["zed", "bob", "amy", "cat"] {
            ids.push(seed_user(&client, name, Role::Student).await.id);
        }
        let names = |users: &[UserWithRelations]| -> Vec<String> {
            users.iter().map(|u| u.username.clone()).collect()
        };

        let asc = client
            .user()
            .find_many(
                FindManyArgs::new()
                    .order_by(OrderByInput::asc(Column::Username))
                    .cursor(ids[1]),
            )
            .await
            .unwrap();
        assert_eq!(names(&asc[..]), ["bob", "cat", "zed"]);

        let desc = client
            .user()
            .find_many(
                FindManyArgs::new()
                    .order_by(OrderByInput::desc(Column::Username))
                    .cursor(ids[3])
                    .take(2),
            )
            .await
            .unwrap();
        assert_eq!(names(&desc[..]), ["cat", "bob"]);

        let missing = client
            .user()
            .find_many(FindManyArgs::new().cursor(9_999))
            .await
            .unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_cursor_with_shared_and_null_sort_keys() {
        let client = memory_client().await;
        let mut ids = Vec::new();
        for (name, phone) in [
            ("par1", Some("555-0001")),
            ("par2", None),
            ("par3", Some("555-0001")),
            ("par4", None),
            ("par5", Some("555-0002")),
        ] {
            let mut input = UserCreateInput::new(
                name,
                format!("{name}@school.edu"),
                "hash",
                name,
                "Tester",
                Role::Parent,
            );
            if let Some(phone) = phone {
                input = input.phone(phone);
            }
            ids.push(client.user().create(input).await.unwrap().id);
        }
        let by_phone = |cursor: i64| {
            FindManyArgs::new()
                .order_by(OrderByInput::asc(Column::Phone))
                .cursor(cursor)
        };

        // SQLite 升序时 NULL 在前：par2, par4, par1, par3, par5
        let from_null = client.user().find_many(by_phone(ids[3])).await.unwrap();
        let got: Vec<_> = from_null.iter().map(|u| u.id).collect();
        assert_eq!(got, vec![ids[3], ids[0], ids[2], ids[4]]);

        // 相同电话按主键区分
        let from_tie = client.user().find_many(by_phone(ids[2])).await.unwrap();
        let got: Vec<_> = from_tie.iter().map(|u| u.id).collect();
        assert_eq!(got, vec![ids[2], ids[4]]);
    }

    #[tokio::test]
    async fn test_logical_combinators() {
        let client = memory_client().await;
        for name in ["anna", "bert", "cleo"] {
            seed_user(&client, name, Role::Student).await;
        }

        let either = client
            .user()
            .count(Some(UserWhereInput {
                or: Some(vec![
                    UserWhereInput {
                        username: Some(StringFilter::equals("anna")),
                        ..Default::default()
                    },
                    UserWhereInput {
                        username: Some(StringFilter::equals("cleo")),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(either, 2);

        // 空 OR 不匹配任何记录，空 AND 不起作用
        let empty_or = client
            .user()
            .count(Some(UserWhereInput {
                or: Some(Vec::new()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(empty_or, 0);
        let empty_and = client
            .user()
            .count(Some(UserWhereInput {
                and: Vec::new(),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(empty_and, 3);

        let from_json: UserWhereInput = serde_json::from_str(r#"{"OR": []}"#).unwrap();
        assert_eq!(client.user().count(Some(from_json)).await.unwrap(), 0);

        let not_anna = client
            .user()
            .count(Some(UserWhereInput {
                not: vec![UserWhereInput {
                    username: Some(StringFilter::equals("anna")),
                    ..Default::default()
                }],
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(not_anna, 2);
    }

    #[tokio::test]
    async fn test_update_clears_nullable_and_bumps_timestamp() {
        let client = memory_client().await;
        let user = client
            .user()
            .create(
                UserCreateInput::new(
                    "hedy",
                    "hedy@school.edu",
                    "hash",
                    "Hedy",
                    "Lamarr",
                    Role::Parent,
                )
                .phone("555-0199"),
            )
            .await
            .unwrap();

        let updated = client
            .user()
            .update(
                UserWhereUniqueInput::Id(user.id),
                UserUpdateInput {
                    first_name: Some("Hedwig".into()),
                    phone: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Hedwig");
        assert_eq!(updated.phone, None);
        assert!(updated.updated_at >= user.updated_at);

        let unchanged = client
            .user()
            .update(UserWhereUniqueInput::Id(user.id), UserUpdateInput::default())
            .await
            .unwrap();
        assert_eq!(unchanged, updated);

        let err = client
            .user()
            .update(UserWhereUniqueInput::Id(9999), UserUpdateInput::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let client = memory_client().await;
        let args = || {
            UpsertArgs::new(
                UserWhereUniqueInput::Email("lin@school.edu".into()),
                UserCreateInput::new("lin", "lin@school.edu", "hash", "Lin", "Wei", Role::Student),
                UserUpdateInput {
                    last_name: Some("Zhang".into()),
                    ..Default::default()
                },
            )
        };

        let created = client.user().upsert(args()).await.unwrap();
        assert_eq!(created.last_name, "Wei");
        let updated = client.user().upsert(args()).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.last_name, "Zhang");
        assert_eq!(client.user().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_many_skip_duplicates() {
        let client = memory_client().await;
        seed_user(&client, "dup", Role::Student).await;

        let data = vec![
            UserCreateInput::new("dup", "dup@school.edu", "hash", "D", "Up", Role::Student),
            UserCreateInput::new("fresh", "fresh@school.edu", "hash", "F", "Resh", Role::Student),
        ];

        let err = client
            .user()
            .create_many(CreateManyArgs::new(data.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        let payload = client
            .user()
            .create_many(CreateManyArgs::new(data).skip_duplicates())
            .await
            .unwrap();
        assert_eq!(payload.count, 1);
        assert_eq!(client.user().count(None).await.unwrap(), 2);

        let empty = client.user().create_many(Vec::<UserCreateInput>::new()).await.unwrap();
        assert_eq!(empty.count, 0);
    }

    #[tokio::test]
    async fn test_update_many_and_delete_many() {
        let client = memory_client().await;
        for name in ["s1x", "s2x", "s3x"] {
            seed_user(&client, name, Role::Student).await;
        }
        seed_user(&client, "t1x", Role::Teacher).await;

        let students = UserWhereInput {
            role: Some(EnumFilter::equals(Role::Student)),
            ..Default::default()
        };
        let updated = client
            .user()
            .update_many(
                Some(students.clone()),
                UserUpdateInput {
                    address: Some(Some("North Campus".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.count, 3);

        let deleted = client.user().delete_many(Some(students)).await.unwrap();
        assert_eq!(deleted.count, 3);
        assert_eq!(client.user().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let client = memory_client().await;
        let user = seed_user(&client, "gone", Role::Student).await;
        let removed = client
            .user()
            .delete(UserWhereUniqueInput::Username("gone".into()))
            .await
            .unwrap();
        assert_eq!(removed.id, user.id);
        assert!(
            client
                .user()
                .delete(UserWhereUniqueInput::Id(user.id))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_relation_filter_and_include() {
        let client = memory_client().await;
        let teacher = seed_user(&client, "mentor", Role::Teacher).await;
        seed_user(&client, "idle", Role::Teacher).await;
        seed_class(&client, teacher.id, "7A").await;
        seed_class(&client, teacher.id, "7B").await;

        let with_classes = client
            .user()
            .find_many(
                FindManyArgs::new()
                    .filter(UserWhereInput {
                        classes_taught: Some(ListRelationFilter::some(ClassWhereInput::default())),
                        ..Default::default()
                    })
                    .include(UserInclude {
                        classes_taught: true,
                        ..Default::default()
                    }),
            )
            .await
            .unwrap();
        assert_eq!(with_classes.len(), 1);
        assert_eq!(with_classes[0].username, "mentor");
        let classes = with_classes[0].classes_taught.as_ref().unwrap();
        assert_eq!(classes.len(), 2);
        assert!(with_classes[0].subjects_taught.is_none());

        let without = client
            .user()
            .count(Some(UserWhereInput {
                classes_taught: Some(ListRelationFilter::none(ClassWhereInput::default())),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(without, 1);

        let idle = client
            .user()
            .find_unique(
                FindUniqueArgs::new(UserWhereUniqueInput::Username("idle".into())).include(
                    UserInclude {
                        classes_taught: true,
                        ..Default::default()
                    },
                ),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(idle.classes_taught.as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_only_counts_for_users() {
        let client = memory_client().await;
        seed_user(&client, "one", Role::Student).await;
        seed_user(&client, "two", Role::Student).await;

        let result = client
            .user()
            .aggregate(AggregateArgs::new().count())
            .await
            .unwrap();
        assert_eq!(result.count, Some(2));

        let err = client
            .user()
            .aggregate(AggregateArgs::new().avg(Column::Username))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}

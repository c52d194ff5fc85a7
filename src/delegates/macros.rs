//! 委托生成宏
//!
//! 每个实体的委托都拥有同一组操作，差异只在实体模块、输入类型与数值列。
//! 实体相关的转换（where 条件、ActiveModel 构造、关联加载）由各实体文件实现。

/// 定义实体委托
///
/// 生成：
/// - 委托结构体，借用连接（普通连接或事务）
/// - find/create/update/delete/count/aggregate/group_by 全套操作
macro_rules! define_delegate {
    (
        $(#[$meta:meta])*
        $delegate:ident {
            module: $module:ident,
            name: $name:literal,
            label: $label:literal,
            record: $record:ty,
            into_record: $into:ident,
            where_input: $where_input:ty,
            where_unique: $unique:ty,
            create: $create:ty,
            update: $update:ty,
            include: $include:ty,
            with_relations: $with:ty,
            numeric: [$($numeric:ident),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $delegate<'a, C> {
            db: &'a C,
        }

        impl<'a, C> $delegate<'a, C>
        where
            C: sea_orm::ConnectionTrait,
        {
            /// 允许 avg/sum/min/max 的列
            pub const NUMERIC_COLUMNS: &'static [crate::entity::$module::Column] =
                &[$(crate::entity::$module::Column::$numeric),*];

            pub(crate) fn new(db: &'a C) -> Self {
                Self { db }
            }

            fn where_condition(filter: Option<&$where_input>) -> sea_orm::Condition {
                use crate::models::common::WhereInput;
                filter
                    .map(|f| f.to_condition())
                    .unwrap_or_else(sea_orm::Condition::all)
            }

            async fn with_include(
                &self,
                include: Option<&$include>,
                records: Vec<$record>,
            ) -> crate::errors::Result<Vec<$with>> {
                match include {
                    Some(include) => include.load(self.db, records).await,
                    None => Ok(records.into_iter().map(<$with>::from).collect()),
                }
            }

            async fn find_existing(
                &self,
                filter: &$unique,
            ) -> crate::errors::Result<crate::entity::$module::Model> {
                use sea_orm::{EntityTrait, QueryFilter};

                crate::entity::$module::Entity::find()
                    .filter(filter.to_condition())
                    .one(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(concat!("查询", $label, "失败"), e)
                    })?
                    .ok_or_else(|| {
                        crate::errors::SchoolError::record_not_found(format!(
                            "No {} found for {:?}",
                            $name, filter
                        ))
                    })
            }

            /// 按唯一键查询
            pub async fn find_unique(
                &self,
                args: impl Into<crate::models::common::FindUniqueArgs<$unique, $include>>,
            ) -> crate::errors::Result<Option<$with>> {
                use sea_orm::{EntityTrait, QueryFilter};

                let args = args.into();
                tracing::debug!(entity = $name, filter = ?args.filter, "find_unique");

                let model = crate::entity::$module::Entity::find()
                    .filter(args.filter.to_condition())
                    .one(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(concat!("查询", $label, "失败"), e)
                    })?;

                let Some(model) = model else {
                    return Ok(None);
                };
                let mut loaded = self
                    .with_include(args.include.as_ref(), vec![model.$into()])
                    .await?;
                Ok(loaded.pop())
            }

            /// 按唯一键查询，不存在时返回 RecordNotFound
            pub async fn find_unique_or_throw(
                &self,
                args: impl Into<crate::models::common::FindUniqueArgs<$unique, $include>>,
            ) -> crate::errors::Result<$with> {
                self.find_unique(args).await?.ok_or_else(|| {
                    crate::errors::SchoolError::record_not_found(concat!("No ", $name, " found"))
                })
            }

            /// 返回 find_many 窗口中的第一条
            pub async fn find_first(
                &self,
                mut args: crate::models::common::FindManyArgs<
                    $where_input,
                    crate::entity::$module::Column,
                    $include,
                >,
            ) -> crate::errors::Result<Option<$with>> {
                args.take = Some(1);
                Ok(self.find_many(args).await?.into_iter().next())
            }

            pub async fn find_first_or_throw(
                &self,
                args: crate::models::common::FindManyArgs<
                    $where_input,
                    crate::entity::$module::Column,
                    $include,
                >,
            ) -> crate::errors::Result<$with> {
                self.find_first(args).await?.ok_or_else(|| {
                    crate::errors::SchoolError::record_not_found(concat!("No ", $name, " found"))
                })
            }

            /// 过滤、排序、分页并按需加载关联
            pub async fn find_many(
                &self,
                args: crate::models::common::FindManyArgs<
                    $where_input,
                    crate::entity::$module::Column,
                    $include,
                >,
            ) -> crate::errors::Result<Vec<$with>> {
                use sea_orm::{EntityTrait, QueryFilter};

                tracing::debug!(
                    entity = $name,
                    skip = ?args.skip,
                    take = ?args.take,
                    cursor = ?args.cursor,
                    "find_many"
                );

                let cursor = crate::delegates::query::cursor_condition::<
                    crate::entity::$module::Entity,
                    _,
                >(
                    self.db,
                    &args.order_by,
                    args.cursor,
                    crate::entity::$module::Column::Id,
                    $name,
                )
                .await?;
                let select = crate::delegates::query::apply_window(
                    crate::entity::$module::Entity::find()
                        .filter(Self::where_condition(args.filter.as_ref())),
                    &args.order_by,
                    cursor,
                    args.skip,
                    args.take,
                    crate::entity::$module::Column::Id,
                );

                let models = select.all(self.db).await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("查询", $label, "列表失败"), e)
                })?;

                let records = models.into_iter().map(|m| m.$into()).collect();
                self.with_include(args.include.as_ref(), records).await
            }

            /// 只返回指定列，每条记录为一个 JSON 对象
            pub async fn find_many_select(
                &self,
                args: crate::models::common::FindManyArgs<
                    $where_input,
                    crate::entity::$module::Column,
                    $include,
                >,
                columns: &[crate::entity::$module::Column],
            ) -> crate::errors::Result<Vec<serde_json::Value>> {
                use sea_orm::{EntityTrait, QueryFilter};

                let cursor = crate::delegates::query::cursor_condition::<
                    crate::entity::$module::Entity,
                    _,
                >(
                    self.db,
                    &args.order_by,
                    args.cursor,
                    crate::entity::$module::Column::Id,
                    $name,
                )
                .await?;
                let select = crate::delegates::query::apply_window(
                    crate::entity::$module::Entity::find()
                        .filter(Self::where_condition(args.filter.as_ref())),
                    &args.order_by,
                    cursor,
                    args.skip,
                    args.take,
                    crate::entity::$module::Column::Id,
                );
                crate::delegates::query::select_columns(self.db, select, columns, $name).await
            }

            /// 分页查询，页码从 1 开始，页大小限制在 1..=100
            pub async fn paginate(
                &self,
                filter: Option<$where_input>,
                order_by: Vec<
                    crate::models::common::OrderByInput<crate::entity::$module::Column>,
                >,
                page: u64,
                size: u64,
            ) -> crate::errors::Result<crate::models::common::PaginatedResponse<$record>> {
                use crate::models::common::{PaginatedResponse, PaginationInfo};
                use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter};

                let (page, size) = crate::models::common::pagination::normalize_page(page, size);
                let select = crate::delegates::query::apply_window(
                    crate::entity::$module::Entity::find()
                        .filter(Self::where_condition(filter.as_ref())),
                    &order_by,
                    None,
                    None,
                    None,
                    crate::entity::$module::Column::Id,
                );

                let paginator = select.paginate(self.db, size);
                let total = paginator.num_items().await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("查询", $label, "总数失败"), e)
                })?;
                let models = paginator.fetch_page(page - 1).await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("查询", $label, "列表失败"), e)
                })?;

                Ok(PaginatedResponse {
                    items: models.into_iter().map(|m| m.$into()).collect(),
                    pagination: PaginationInfo::new(page, size, total),
                })
            }

            /// 创建一条记录
            pub async fn create(&self, data: $create) -> crate::errors::Result<$record> {
                use sea_orm::ActiveModelTrait;

                let model = data.into_active_model(crate::utils::now_timestamp())?;
                let created = model.insert(self.db).await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("创建", $label, "失败"), e)
                })?;

                tracing::debug!(entity = $name, id = created.id, "created");
                Ok(created.$into())
            }

            /// 批量创建，`skip_duplicates` 时忽略唯一约束冲突的行
            pub async fn create_many(
                &self,
                args: impl Into<crate::models::common::CreateManyArgs<$create>>,
            ) -> crate::errors::Result<crate::models::common::BatchPayload> {
                use crate::models::common::BatchPayload;
                use sea_orm::EntityTrait;
                use sea_orm::sea_query::OnConflict;

                let args = args.into();
                if args.data.is_empty() {
                    return Ok(BatchPayload::default());
                }

                let now = crate::utils::now_timestamp();
                let models = args
                    .data
                    .into_iter()
                    .map(|data| data.into_active_model(now))
                    .collect::<crate::errors::Result<Vec<_>>>()?;

                let mut insert = crate::entity::$module::Entity::insert_many(models);
                if args.skip_duplicates {
                    insert = insert.on_conflict(OnConflict::new().do_nothing().to_owned());
                }
                let count = insert.exec_without_returning(self.db).await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("批量创建", $label, "失败"), e)
                })?;

                tracing::debug!(entity = $name, count, "create_many");
                Ok(BatchPayload { count })
            }

            /// 更新一条记录，不存在时返回 RecordNotFound
            pub async fn update(
                &self,
                filter: $unique,
                data: $update,
            ) -> crate::errors::Result<$record> {
                use sea_orm::{ActiveModelTrait, ActiveValue};

                let existing = self.find_existing(&filter).await?;
                let mut model = data.into_active_model(crate::utils::now_timestamp())?;
                if !model.is_changed() {
                    return Ok(existing.$into());
                }

                model.id = ActiveValue::Unchanged(existing.id);
                let updated = model.update(self.db).await.map_err(|e| {
                    crate::errors::SchoolError::from_db_err(concat!("更新", $label, "失败"), e)
                })?;

                tracing::debug!(entity = $name, id = updated.id, "updated");
                Ok(updated.$into())
            }

            /// 更新所有匹配记录
            pub async fn update_many(
                &self,
                filter: Option<$where_input>,
                data: $update,
            ) -> crate::errors::Result<crate::models::common::BatchPayload> {
                use crate::models::common::BatchPayload;
                use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter};

                let model = data.into_active_model(crate::utils::now_timestamp())?;
                if !model.is_changed() {
                    let count = self.count(filter).await?;
                    return Ok(BatchPayload { count });
                }

                let result = crate::entity::$module::Entity::update_many()
                    .set(model)
                    .filter(Self::where_condition(filter.as_ref()))
                    .exec(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(
                            concat!("批量更新", $label, "失败"),
                            e,
                        )
                    })?;

                tracing::debug!(entity = $name, count = result.rows_affected, "update_many");
                Ok(BatchPayload {
                    count: result.rows_affected,
                })
            }

            /// 唯一键命中时更新，否则创建
            pub async fn upsert(
                &self,
                args: crate::models::common::UpsertArgs<$unique, $create, $update>,
            ) -> crate::errors::Result<$record> {
                match self.find_existing(&args.filter).await {
                    Ok(_) => self.update(args.filter, args.update).await,
                    Err(e) if e.is_not_found() => self.create(args.create).await,
                    Err(e) => Err(e),
                }
            }

            /// 删除一条记录并返回删除前的数据
            pub async fn delete(&self, filter: $unique) -> crate::errors::Result<$record> {
                use sea_orm::EntityTrait;

                let existing = self.find_existing(&filter).await?;
                crate::entity::$module::Entity::delete_by_id(existing.id)
                    .exec(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(concat!("删除", $label, "失败"), e)
                    })?;

                tracing::debug!(entity = $name, id = existing.id, "deleted");
                Ok(existing.$into())
            }

            /// 删除所有匹配记录
            pub async fn delete_many(
                &self,
                filter: Option<$where_input>,
            ) -> crate::errors::Result<crate::models::common::BatchPayload> {
                use sea_orm::{EntityTrait, QueryFilter};

                let result = crate::entity::$module::Entity::delete_many()
                    .filter(Self::where_condition(filter.as_ref()))
                    .exec(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(
                            concat!("批量删除", $label, "失败"),
                            e,
                        )
                    })?;

                tracing::debug!(entity = $name, count = result.rows_affected, "delete_many");
                Ok(crate::models::common::BatchPayload {
                    count: result.rows_affected,
                })
            }

            /// 统计匹配记录数
            pub async fn count(&self, filter: Option<$where_input>) -> crate::errors::Result<u64> {
                use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter};

                crate::entity::$module::Entity::find()
                    .filter(Self::where_condition(filter.as_ref()))
                    .count(self.db)
                    .await
                    .map_err(|e| {
                        crate::errors::SchoolError::from_db_err(concat!("统计", $label, "失败"), e)
                    })
            }

            /// 计算 _count 与数值列的 avg/sum/min/max
            pub async fn aggregate(
                &self,
                args: crate::models::common::AggregateArgs<
                    $where_input,
                    crate::entity::$module::Column,
                >,
            ) -> crate::errors::Result<crate::models::common::AggregateResult> {
                crate::delegates::query::aggregate::<crate::entity::$module::Entity, C>(
                    self.db,
                    Self::where_condition(args.filter.as_ref()),
                    crate::delegates::query::AggregatePlan::from_aggregate(&args),
                    crate::entity::$module::Column::Id,
                    Self::NUMERIC_COLUMNS,
                    $name,
                )
                .await
            }

            /// 分组统计
            pub async fn group_by(
                &self,
                args: crate::models::common::GroupByArgs<
                    $where_input,
                    crate::entity::$module::Column,
                >,
            ) -> crate::errors::Result<Vec<crate::models::common::GroupByRow>> {
                crate::delegates::query::group_by::<crate::entity::$module::Entity, C, _>(
                    self.db,
                    &args,
                    Self::where_condition(args.filter.as_ref()),
                    crate::entity::$module::Column::Id,
                    Self::NUMERIC_COLUMNS,
                    $name,
                )
                .await
            }
        }
    };
}

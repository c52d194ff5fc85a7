//! 数据访问客户端
//!
//! `SchoolClient` 持有连接（连接池或事务），并为每个实体提供委托。
//! 事务闭包拿到的是绑定到 `DatabaseTransaction` 的同类型客户端。

mod connection;
mod raw;
mod transaction;

use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::delegates::{
    AssignmentDelegate, AttendanceDelegate, ClassDelegate, EnrollmentDelegate, ExamDelegate,
    LessonDelegate, StudentArchiveDelegate, StudentParentRelationDelegate, SubjectDelegate,
    UserDelegate,
};

pub use transaction::{TransactionFuture, TransactionOptions};

/// 学校数据客户端
#[derive(Debug, Clone)]
pub struct SchoolClient<C = DatabaseConnection> {
    db: C,
    transaction_timeout: Duration,
}

impl<C> SchoolClient<C> {
    /// 底层连接
    pub fn connection(&self) -> &C {
        &self.db
    }

    /// 交互式事务的默认超时
    pub fn transaction_timeout(&self) -> Duration {
        self.transaction_timeout
    }
}

impl<C: ConnectionTrait> SchoolClient<C> {
    pub fn user(&self) -> UserDelegate<'_, C> {
        UserDelegate::new(&self.db)
    }

    pub fn class(&self) -> ClassDelegate<'_, C> {
        ClassDelegate::new(&self.db)
    }

    pub fn subject(&self) -> SubjectDelegate<'_, C> {
        SubjectDelegate::new(&self.db)
    }

    pub fn enrollment(&self) -> EnrollmentDelegate<'_, C> {
        EnrollmentDelegate::new(&self.db)
    }

    pub fn student_parent_relation(&self) -> StudentParentRelationDelegate<'_, C> {
        StudentParentRelationDelegate::new(&self.db)
    }

    pub fn lesson(&self) -> LessonDelegate<'_, C> {
        LessonDelegate::new(&self.db)
    }

    pub fn assignment(&self) -> AssignmentDelegate<'_, C> {
        AssignmentDelegate::new(&self.db)
    }

    pub fn exam(&self) -> ExamDelegate<'_, C> {
        ExamDelegate::new(&self.db)
    }

    pub fn attendance(&self) -> AttendanceDelegate<'_, C> {
        AttendanceDelegate::new(&self.db)
    }

    pub fn student_archive(&self) -> StudentArchiveDelegate<'_, C> {
        StudentArchiveDelegate::new(&self.db)
    }
}

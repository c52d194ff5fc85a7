use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

/// `LOWER(column) LIKE pattern`，模式需已转义
pub(crate) fn lower_like<C: ColumnTrait>(column: C, pattern: &str) -> Condition {
    let lowered = Func::lower(Expr::col((column.entity_name(), column)));
    Condition::all()
        .add(Expr::expr(lowered).like(LikeExpr::new(pattern.to_lowercase()).escape('\\')))
}

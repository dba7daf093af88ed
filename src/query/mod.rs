//! The challenge solutions, one function per challenge, written with the
//! SeaORM query builder.
//!
//! | Level | Module          | Topic                                  |
//! |-------|-----------------|----------------------------------------|
//! | 1, 2  | [`basic`]       | lookups, ordering, filtering           |
//! | 3     | [`association`] | eager loading and existence joins      |
//! | 4, 5  | [`aggregate`]   | `GROUP BY`, `HAVING`, counts           |
//! | 6     | [`advanced`]    | anti joins, many-to-many grouping      |
//! | 7, 8  | [`expert`]      | derived metrics, multi-condition search |
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] and returns
//! rows in a deterministic order.

pub mod advanced;
pub mod aggregate;
pub mod association;
pub mod basic;
pub mod expert;

pub use advanced::*;
pub use aggregate::*;
pub use association::*;
pub use basic::*;
pub use expert::*;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait,
};

/// Database counts are `i64`; the metrics records use `u64`.
pub(crate) fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

/// `col` contains `needle`, ignoring case. `%`, `_` and `\` in `needle` match
/// themselves.
pub(crate) fn contains_text<C: ColumnTrait>(col: C, needle: &str) -> SimpleExpr {
    like_lower(col, format!("%{}%", escape_like(needle)))
}

/// `col` starts with `prefix`, ignoring case
pub(crate) fn starts_with_text<C: ColumnTrait>(col: C, prefix: &str) -> SimpleExpr {
    like_lower(col, format!("{}%", escape_like(prefix)))
}

fn like_lower<C: ColumnTrait>(col: C, pattern: String) -> SimpleExpr {
    Expr::expr(Func::lower(col.into_expr()))
        .like(LikeExpr::new(pattern.to_lowercase()).escape('\\'))
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

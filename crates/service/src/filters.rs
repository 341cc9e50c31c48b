use sea_orm::sea_query::{LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;

const LIKE_ESCAPE: char = '\\';

/// Escapes `\`, `%` and `_` so the keyword matches literally inside `LIKE`.
pub fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// `col LIKE '%keyword%'` with the keyword taken as a plain substring.
pub fn contains_literal<C: ColumnTrait>(col: C, keyword: &str) -> SimpleExpr {
    col.like(LikeExpr::new(format!("%{}%", escape_like(keyword))).escape(LIKE_ESCAPE))
}

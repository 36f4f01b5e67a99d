//! Helpers for classifying SQLx database errors.

/// Unique constraint guarding the `alias` column of `urls`.
pub const ALIAS_CONSTRAINT: &str = "urls_alias_key";

/// Returns true if `e` is a unique violation of the given constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

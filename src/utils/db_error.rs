//! Classification of `sqlx` errors into the store failure taxonomy.

/// Name of the UNIQUE constraint on `links.code`.
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

/// Returns true when the error is a unique violation on the short code.
///
/// Only this case is recoverable (by generating a new code); unique
/// violations on any other constraint are ordinary failures.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_CODE_CONSTRAINT))
}

/// Returns true when the store itself could not be reached.
pub fn is_store_unavailable(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}

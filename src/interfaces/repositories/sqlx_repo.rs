use sqlx::{postgres::PgQueryResult, PgPool};

use crate::errors::AppError;

#[derive(Clone)]
pub struct SqlxEventRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxNewsRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMediaRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPartnerRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMemberRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub pool: PgPool,
}

/// A unique violation on `constraint` becomes a 409; anything else goes
/// through the generic conversion.
pub(crate) fn slug_conflict(err: sqlx::Error, constraint: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(constraint) {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(err)
}

pub(crate) fn ensure_affected(result: PgQueryResult, what: &str) -> Result<(), AppError> {
    if result.rows_affected() == 0 {
        Err(AppError::NotFound(format!("{} not found", what)))
    } else {
        Ok(())
    }
}

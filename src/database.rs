/// Database connection pool type
pub type DbPool = sqlx::PgPool;

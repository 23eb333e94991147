use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

// create database connection pool with the database url using diesel
pub fn create_db_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .test_on_check_out(true)
        .build(manager)
}

// run diesel migrations
pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;
    Ok(())
}

// shared pool for database tests; None only when DATABASE_URL is not configured
#[cfg(test)]
pub fn test_pool() -> Option<&'static DbPool> {
    static POOL: once_cell::sync::OnceCell<Option<DbPool>> = once_cell::sync::OnceCell::new();
    POOL.get_or_init(|| {
        dotenvy::dotenv().ok();
        open_test_pool(std::env::var("DATABASE_URL").ok())
    })
    .as_ref()
}

// a configured but broken database fails the test run instead of skipping it
#[cfg(test)]
fn open_test_pool(database_url: Option<String>) -> Option<DbPool> {
    use diesel::Connection;

    let url = database_url?;
    if let Err(e) = PgConnection::establish(&url) {
        panic!("DATABASE_URL is set but the test database is unreachable: {e}");
    }
    let pool = match create_db_connection_pool(&url, 8) {
        Ok(pool) => pool,
        Err(e) => panic!("failed to create test database pool: {e}"),
    };
    if let Err(e) = run_migrations(&pool) {
        panic!("failed to migrate test database: {e:#}");
    }
    Some(pool)
}

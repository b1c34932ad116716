pub mod projects;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Process-wide connection pool. The first call connects and applies
/// migrations; later calls reuse that pool and ignore their arguments.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");

        Ok::<_, sqlx::Error>(pool)
    })
    .await
    .cloned()
}

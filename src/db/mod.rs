pub mod queries;

use std::str::FromStr;

use secrecy::ExposeSecret;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

use crate::settings::DatabaseSettings;

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    let options =
        SqliteConnectOptions::from_str(settings.url.expose_secret())?.create_if_missing(true);
    // in-memory databases live only as long as their connection
    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
pub(crate) mod testing {
    use secrecy::SecretString;
    use sqlx::SqlitePool;

    use crate::settings::DatabaseSettings;

    pub async fn memory_pool() -> SqlitePool {
        let settings = DatabaseSettings {
            url: SecretString::from("sqlite::memory:".to_owned()),
            max_connections: 1,
        };
        let pool = super::establish_connection(&settings).await.unwrap();
        super::run_migrations(&pool).await.unwrap();
        pool
    }

    pub async fn seed(pool: &SqlitePool) {
        for (id, kind) in [(1, "Science"), (2, "Art"), (3, "Geography")] {
            sqlx::query("INSERT INTO categories (id, type) VALUES (?1, ?2)")
                .bind(id)
                .bind(kind)
                .execute(pool)
                .await
                .unwrap();
        }
        for n in 1..=12_i64 {
            sqlx::query(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(format!("Question title {n}?"))
            .bind(format!("Answer {n}"))
            .bind(n % 3 + 1)
            .bind(n % 5 + 1)
            .execute(pool)
            .await
            .unwrap();
        }
    }
}

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

const CATEGORIES_FILE: &str = "categories.csv";
const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    tracing::info!(
        "Exporting {} categories and {} questions to {}",
        categories.len(),
        questions.len(),
        path.display()
    );
    write_to(&path.join(CATEGORIES_FILE), categories)?;
    write_to(&path.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

pub async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&path.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&path.join(QUESTIONS_FILE))?;
    tracing::info!(
        "Importing {} categories and {} questions from {}",
        categories.len(),
        questions.len(),
        path.display()
    );
    import_categories(pool, categories)
        .await
        .context("Cannot import categories")?;
    import_questions(pool, questions)
        .await
        .context("Cannot import questions")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::db::testing::{memory_pool, seed};

    fn seed_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[tokio::test]
    async fn imports_bundled_seed_data() {
        let pool = memory_pool().await;
        import_data(&pool, &seed_dir()).await.unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[3].kind, "History");

        let questions = get_all_questions(&pool).await.unwrap();
        assert_eq!(questions.len(), 19);
        assert_eq!(questions[0].answer, "Apollo 13");
    }

    #[tokio::test]
    async fn export_writes_headers_and_rows() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("dump");

        export_data(&pool, &target).await.unwrap();

        let categories = std::fs::read_to_string(target.join(CATEGORIES_FILE)).unwrap();
        assert_eq!(categories.lines().next(), Some("id,type"));
        assert_eq!(categories.lines().count(), 4);
        let questions = std::fs::read_to_string(target.join(QUESTIONS_FILE)).unwrap();
        assert_eq!(
            questions.lines().next(),
            Some("id,question,answer,category,difficulty")
        );
        assert_eq!(questions.lines().count(), 13);
    }

    #[tokio::test]
    async fn missing_files_are_reported() {
        let pool = memory_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let err = import_data(&pool, dir.path()).await.unwrap_err();
        assert!(err.to_string().contains(CATEGORIES_FILE));
    }
}

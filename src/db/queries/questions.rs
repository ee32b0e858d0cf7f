use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over the question text.
///
/// SQLite `LIKE` only folds ASCII, so matching happens on Unicode-lowercased text here.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

/// Picks one random question, optionally limited to `category`, whose id is not in `exclude`.
pub async fn random_question(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    // one JSON parameter keeps arbitrarily long exclusion lists under the bind limit
    let exclude =
        serde_json::to_string(exclude).map_err(|err| sqlx::Error::Encode(Box::new(err)))?;
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE (?1 IS NULL OR questions.category = ?1)
        AND questions.id NOT IN (SELECT value FROM json_each(?2))
        ORDER BY RANDOM() LIMIT 1
        "#,
    )
    .bind(category)
    .bind(exclude)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, new_question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new_question.question)
    .bind(&new_question.answer)
    .bind(new_question.category)
    .bind(new_question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{memory_pool, seed};

    fn ids(questions: &[Question]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let upper = search_questions(&pool, "TITLE").await.unwrap();
        let lower = search_questions(&pool, "title").await.unwrap();
        assert_eq!(upper.len(), 12);
        assert_eq!(ids(&upper), ids(&lower));

        let id = create_question(
            &pool,
            &NewQuestion {
                question: "Who painted Égypte?".into(),
                answer: "A".into(),
                category: 1,
                difficulty: 1,
            },
        )
        .await
        .unwrap();
        assert_eq!(ids(&search_questions(&pool, "ÉGYPTE").await.unwrap()), vec![id]);
        assert_eq!(ids(&search_questions(&pool, "égypte").await.unwrap()), vec![id]);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = memory_pool().await;
        seed(&pool).await;

        assert!(search_questions(&pool, "%").await.unwrap().is_empty());
        assert!(search_questions(&pool, "title_1").await.unwrap().is_empty());
        assert_eq!(
            ids(&search_questions(&pool, "title 1").await.unwrap()),
            vec![1, 10, 11, 12]
        );
    }

    #[tokio::test]
    async fn category_filter_keeps_order() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let questions = get_questions_for_category(&pool, 2).await.unwrap();
        assert_eq!(ids(&questions), vec![1, 4, 7, 10]);
        assert!(questions.iter().all(|q| q.category == 2));
    }

    #[tokio::test]
    async fn random_question_skips_excluded_ids() {
        let pool = memory_pool().await;
        seed(&pool).await;

        for _ in 0..20 {
            let question = random_question(&pool, Some(2), &[1, 4, 7])
                .await
                .unwrap()
                .unwrap();
            assert_eq!(question.id, 10);
        }
        assert!(random_question(&pool, Some(2), &[1, 4, 7, 10])
            .await
            .unwrap()
            .is_none());

        let all: Vec<i64> = (1..=12).collect();
        assert!(random_question(&pool, None, &all).await.unwrap().is_none());
        assert!(random_question(&pool, None, &[]).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn random_question_accepts_long_exclusion_lists() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let mut exclude: Vec<i64> = (100..40_100).collect();
        exclude.extend([1, 4, 7]);
        let question = random_question(&pool, Some(2), &exclude)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(question.id, 10);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let pool = memory_pool().await;
        let new_question = NewQuestion {
            question: "Q".into(),
            answer: "A".into(),
            category: 2,
            difficulty: 3,
        };

        let first = create_question(&pool, &new_question).await.unwrap();
        assert_eq!(delete_question(&pool, first).await.unwrap(), 1);
        assert_eq!(delete_question(&pool, first).await.unwrap(), 0);
        assert!(get_question_by_id(&pool, first).await.unwrap().is_none());

        let second = create_question(&pool, &new_question).await.unwrap();
        assert!(second > first);
    }
}

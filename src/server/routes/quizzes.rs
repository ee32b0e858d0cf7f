use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState,
        errors::{ApiError, ApiResponse, ResultExt},
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::JsonBody;

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// id 0 stands for "all categories"
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    question: Question,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<NextQuestion> {
    let category = match request.quiz_category.id {
        0 => None,
        id => Some(id),
    };
    let question = questions::random_question(&pool, category, &request.previous_questions)
        .await
        .or_api(ApiError::Unprocessable)?
        .ok_or_else(|| {
            tracing::info!(
                "Quiz exhausted after {} questions",
                request.previous_questions.len()
            );
            ApiError::NotSupported
        })?;

    let scope = if category.is_some() { "category" } else { "all" };
    QUIZ_QUESTIONS_SERVED.with_label_values(&[scope]).inc();

    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}

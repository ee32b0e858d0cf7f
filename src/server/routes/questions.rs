use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, NewQuestion, Question},
    server::{
        app::AppState,
        deserializers::{deserialize_non_empty, deserialize_page, first_page},
        errors::{ApiError, ApiResponse, ResultExt},
        pagination::paginate,
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{
    categories::{format_categories, CategoryMap},
    JsonBody, PathParam, QueryParams,
};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

#[derive(Deserialize)]
struct NewQuestionBody {
    #[serde(deserialize_with = "deserialize_non_empty")]
    question: String,
    #[serde(deserialize_with = "deserialize_non_empty")]
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = questions::get_all_questions(&pool)
        .await
        .or_api(ApiError::BadRequest)?;
    let categories = format_categories(&pool)
        .await
        .or_api(ApiError::BadRequest)?;

    let page_questions = paginate(&questions, page);
    if page_questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: page_questions.to_vec(),
        total_questions: questions.len(),
        categories,
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    PathParam(id): PathParam<i64>,
) -> ApiResponse<Deleted> {
    questions::get_question_by_id(&pool, id)
        .await
        .or_api(ApiError::Unprocessable)?
        .ok_or(ApiError::NotFound)?;

    let deleted = questions::delete_question(&pool, id)
        .await
        .or_api(ApiError::Unprocessable)?;
    if deleted == 0 {
        tracing::warn!("Question {id} disappeared before it could be deleted");
        return Err(ApiError::Unprocessable);
    }
    QUESTIONS_DELETED.inc();
    tracing::info!("Deleted question {id}");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<NewQuestionBody>,
) -> ApiResponse<Created> {
    let new_question = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .or_api(ApiError::Unprocessable)?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {id}");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<SearchResults> {
    let results = questions::search_questions(&pool, &body.search_term)
        .await
        .or_api(ApiError::Unprocessable)?;

    Ok(Json(SearchResults {
        success: true,
        questions: paginate(&results, page).to_vec(),
        total_questions: results.len(),
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}

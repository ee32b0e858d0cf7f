use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        errors::{ApiError, ApiResponse, ResultExt},
    },
};

use super::PathParam;

/// Category id to display name, ordered by id.
pub type CategoryMap = BTreeMap<i64, String>;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

pub async fn format_categories(pool: &SqlitePool) -> sqlx::Result<CategoryMap> {
    let categories = categories::get_all_categories(pool).await?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = format_categories(&pool).await.or_api(ApiError::BadRequest)?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    PathParam(id): PathParam<i64>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let category = categories::get_category(&pool, id)
        .await
        .or_api(ApiError::BadRequest)?
        .ok_or(ApiError::NotFound)?;
    let questions = questions::get_questions_for_category(&pool, id)
        .await
        .or_api(ApiError::BadRequest)?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}

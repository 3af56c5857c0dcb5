//! HTTP handlers for the books catalog

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use shelf_http::error::NOT_FOUND_MESSAGE;
use shelf_http::{AppError, IdPath, ValidJson, ValidPath, ValidQuery};
use shelf_store::ResourceStore;

use super::models::{Book, BookRequest, PublishedYearPath, RatingQuery};

/// Books routes over any store of [`Book`]s
pub fn router<S: ResourceStore<Book>>(store: Arc<S>) -> Router {
    Router::new()
        .route("/books", get(list_books::<S>))
        .route("/books/", get(books_by_rating::<S>))
        .route("/books/{id}", get(get_book::<S>).delete(delete_book::<S>))
        .route(
            "/books/published_year/{published_year}",
            get(books_by_published_year::<S>),
        )
        .route("/create-book", post(create_book::<S>))
        .route("/update_book", put(update_book::<S>))
        .with_state(store)
}

/// GET /books
async fn list_books<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(store.list_all().await?))
}

/// GET /books/{id}
async fn get_book<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    IdPath(id): IdPath,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.get_by_id(id).await?))
}

/// GET /books/?rating=R
async fn books_by_rating<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    ValidQuery(RatingQuery { rating }): ValidQuery<RatingQuery>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.find_by(move |book: &Book| book.rating == rating).await?;
    Ok(Json(books))
}

/// GET /books/published_year/{published_year}
async fn books_by_published_year<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    ValidPath(PublishedYearPath { published_year }): ValidPath<PublishedYearPath>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = store
        .find_by(move |book: &Book| book.published_year == published_year)
        .await?;
    Ok(Json(books))
}

/// POST /create-book
async fn create_book<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = store.create(request.into_fields()).await?;
    tracing::info!(id = book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /update_book, matched by the id carried in the body
async fn update_book<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<StatusCode, AppError> {
    // A missing or non-positive id cannot match any stored book.
    let Some(id) = request.id.filter(|id| *id > 0) else {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    };

    store.replace(id, request.into_fields()).await?;
    tracing::info!(id, "book replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /books/{id}
async fn delete_book<S: ResourceStore<Book>>(
    State(store): State<Arc<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    store.delete(id).await?;
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

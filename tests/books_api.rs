mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use shelf_app::modules::books::models::{seed_catalog, Book};
use shelf_app::modules::books::{routes, BooksModule};
use shelf_kernel::settings::BooksSettings;
use shelf_kernel::Module;
use shelf_store::{IdPolicy, MemoryStore};

use common::{delete, get, json as json_req, send, send_json};

fn seeded_app() -> Router {
    BooksModule::from_settings(&BooksSettings::default())
        .unwrap()
        .routes()
}

fn new_book() -> Value {
    json!({
        "title": "New Book",
        "author": "A",
        "description": "D",
        "rating": 4,
        "published_year": 2020
    })
}

fn ids(books: &[Book]) -> Vec<i64> {
    books.iter().map(|b| b.id).collect()
}

#[tokio::test]
async fn lists_seed_catalog_in_order() {
    let app = seeded_app();
    let (status, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, seed_catalog());
}

#[tokio::test]
async fn create_read_delete_scenario() {
    let app = seeded_app();

    let (status, created): (_, Book) =
        send_json(&app, json_req("POST", "/create-book", new_book())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.id, 7);

    let (status, fetched): (_, Book) = send_json(&app, get("/books/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched.title, "New Book");
    assert_eq!(fetched.author, "A");
    assert_eq!(fetched.description, "D");
    assert_eq!(fetched.rating, 4);
    assert_eq!(fetched.published_year, 2020);

    let (status, _) = send(&app, delete("/books/7")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body): (_, Value) = send_json(&app, get("/books/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Item not found");
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = seeded_app();
    let mut body = new_book();
    body["id"] = json!(2);

    let (status, created): (_, Book) =
        send_json(&app, json_req("POST", "/create-book", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.id, 7);

    let (_, original): (_, Book) = send_json(&app, get("/books/2")).await;
    assert_eq!(original.title, "Be Fast with FastAPI");
}

#[tokio::test]
async fn invalid_book_is_rejected_with_field_details() {
    let app = seeded_app();
    let body = json!({
        "title": "ab",
        "author": "",
        "description": "D",
        "rating": 9,
        "published_year": 2020
    });

    let (status, error): (_, Value) =
        send_json(&app, json_req("POST", "/create-book", body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<&str> = error["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "author", "rating"]);

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    assert_eq!(books.len(), 6);
}

#[tokio::test]
async fn missing_fields_are_a_validation_error() {
    let app = seeded_app();
    let (status, _) = send(
        &app,
        json_req("POST", "/create-book", json!({ "title": "Only title" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn filters_by_rating() {
    let app = seeded_app();

    for rating in 1..=5 {
        let (status, books): (_, Vec<Book>) =
            send_json(&app, get(&format!("/books/?rating={rating}"))).await;
        assert_eq!(status, StatusCode::OK);

        let expected: Vec<Book> = seed_catalog()
            .into_iter()
            .filter(|b| b.rating == rating)
            .collect();
        assert_eq!(books, expected, "rating {rating}");
    }

    let (_, fives): (_, Vec<Book>) = send_json(&app, get("/books/?rating=5")).await;
    assert_eq!(ids(&fives), vec![1, 2, 3]);
}

#[tokio::test]
async fn rating_outside_range_is_rejected() {
    let app = seeded_app();
    for uri in ["/books/?rating=0", "/books/?rating=6", "/books/?rating=x", "/books/"] {
        let (status, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test]
async fn filters_by_published_year() {
    let app = seeded_app();

    let (status, books): (_, Vec<Book>) =
        send_json(&app, get("/books/published_year/2019")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&books), vec![2, 4]);

    let (status, books): (_, Vec<Book>) =
        send_json(&app, get("/books/published_year/1850")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(books.is_empty());
}

#[tokio::test]
async fn update_replaces_whole_book() {
    let app = seeded_app();
    let mut body = new_book();
    body["id"] = json!(4);

    let (status, _) = send(&app, json_req("PUT", "/update_book", body)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, book): (_, Book) = send_json(&app, get("/books/4")).await;
    assert_eq!(
        book,
        Book {
            id: 4,
            title: "New Book".to_string(),
            author: "A".to_string(),
            description: "D".to_string(),
            rating: 4,
            published_year: 2020,
        }
    );

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    assert_eq!(ids(&books), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let app = seeded_app();
    let mut body = new_book();
    body["id"] = json!(42);

    let (status, _) = send(&app, json_req("PUT", "/update_book", body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_id_is_not_found() {
    let app = seeded_app();
    let (status, error): (_, Value) =
        send_json(&app, json_req("PUT", "/update_book", new_book())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["message"], "Item not found");
}

#[tokio::test]
async fn update_with_non_positive_id_is_not_found() {
    let app = seeded_app();
    for id in [0, -5] {
        let mut body = new_book();
        body["id"] = json!(id);

        let (status, _) = send(&app, json_req("PUT", "/update_book", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
    }

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    assert_eq!(books.len(), 6);
}

#[tokio::test]
async fn create_accepts_any_client_id() {
    let app = seeded_app();
    for (id, expected) in [(0, 7), (-5, 8)] {
        let mut body = new_book();
        body["id"] = json!(id);

        let (status, created): (_, Book) =
            send_json(&app, json_req("POST", "/create-book", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.id, expected);
    }
}

#[tokio::test]
async fn path_ids_must_be_positive() {
    let app = seeded_app();
    for uri in ["/books/0", "/books/-1"] {
        let (status, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
    let (status, _) = send(&app, delete("/books/0")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn second_delete_is_not_found_and_changes_nothing() {
    let app = seeded_app();

    let (status, _) = send(&app, delete("/books/3")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, delete("/books/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    assert_eq!(ids(&books), vec![1, 2, 4, 5, 6]);
}

#[tokio::test]
async fn max_plus_one_survives_deleting_the_last_book() {
    let store = Arc::new(
        MemoryStore::with_records(IdPolicy::MaxPlusOne, seed_catalog()).unwrap(),
    );
    let app = routes::router(Arc::clone(&store));

    send(&app, delete("/books/2")).await;
    let (_, created): (_, Book) =
        send_json(&app, json_req("POST", "/create-book", new_book())).await;
    assert_eq!(created.id, 7);

    send(&app, delete("/books/7")).await;
    let (_, created): (_, Book) =
        send_json(&app, json_req("POST", "/create-book", new_book())).await;
    assert_eq!(created.id, 7);

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    let mut all = ids(&books);
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), books.len());
}

#[tokio::test]
async fn empty_catalog_starts_at_one() {
    let settings = BooksSettings {
        seed_catalog: false,
        id_policy: IdPolicy::LastPlusOne,
    };
    let app = BooksModule::from_settings(&settings).unwrap().routes();

    let (_, books): (_, Vec<Book>) = send_json(&app, get("/books")).await;
    assert!(books.is_empty());

    let (_, created): (_, Book) =
        send_json(&app, json_req("POST", "/create-book", new_book())).await;
    assert_eq!(created.id, 1);
}

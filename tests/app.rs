mod common;

use axum::http::StatusCode;
use serde_json::Value;
use shelf_app::build_registry;
use shelf_kernel::settings::Settings;
use shelf_kernel::InitCtx;

use common::{get, send, send_json};

async fn assembled(settings: &Settings) -> axum::Router {
    let pool = shelf_db::connect_in_memory().await.unwrap();
    let registry = build_registry(settings).unwrap();
    shelf_db::migrate(&pool, &registry.collect_migrations())
        .await
        .unwrap();

    let ctx = InitCtx {
        settings,
        db: &pool,
    };
    registry.init_all(&ctx).await.unwrap();
    registry.start_all(&ctx).await.unwrap();

    shelf_http::build_router(&registry, settings)
}

#[tokio::test]
async fn both_services_share_one_router() {
    let app = assembled(&Settings::default()).await;

    let (status, books): (_, Vec<Value>) = send_json(&app, get("/books")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books.len(), 6);

    let (status, todos): (_, Vec<Value>) = send_json(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(todos.is_empty());

    let (status, _) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_documents_every_route() {
    let app = assembled(&Settings::default()).await;
    let (status, spec): (_, Value) = send_json(&app, get("/docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);

    for path in [
        "/books",
        "/books/",
        "/books/{id}",
        "/books/published_year/{published_year}",
        "/create-book",
        "/update_book",
        "/",
        "/todo",
        "/todo/{id}",
    ] {
        assert!(spec["paths"][path].is_object(), "{path} undocumented");
    }
    assert!(spec["components"]["schemas"]["BookRequest"].is_object());
    assert!(spec["components"]["schemas"]["Todo"].is_object());
}

#[tokio::test]
async fn disabled_module_is_not_mounted() {
    let mut settings = Settings::default();
    settings.modules.enabled = vec!["books".to_string()];
    let app = assembled(&settings).await;

    let (status, _) = send(&app, get("/books")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/todo/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

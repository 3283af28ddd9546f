use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use product_web::config::{Config, DatabaseConfig, LoggingConfig, ServerConfig, StorageConfig};
use product_web::domain::models::product::Product;
use product_web::domain::repositories::Repository;
use product_web::infrastructure::database::memory::InMemoryRepository;
use product_web::server::{create_app, demo_products, AppState};

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        storage: StorageConfig {
            seed_demo_data: true,
        },
    }
}

fn test_app() -> (Router, Arc<InMemoryRepository<Product>>) {
    let repository = Arc::new(InMemoryRepository::with_entities(demo_products()));
    let app = create_app(AppState {
        config: test_config(),
        products: repository.clone(),
    });
    (app, repository)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("location").to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok_with_environment() {
    let (app, _) = test_app();

    let (status, _, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn index_lists_seeded_products() {
    let (app, _) = test_app();

    let (status, _, body) = send(app, get("/products")).await;

    assert_eq!(status, StatusCode::OK);
    let model = body["model"].as_array().expect("product list");
    assert_eq!(model.len(), 2);
    assert_eq!(model[0]["name"], "Pen");
    assert_eq!(model[1]["color"], "Blue");
}

#[tokio::test]
async fn details_routes_cover_every_branch() {
    let (app, _) = test_app();

    let (status, _, body) = send(app.clone(), get("/products/details/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["id"], 1);
    assert_eq!(body["model"]["name"], "Pen");

    let (status, _, body) = send(app.clone(), get("/products/details/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, location, _) = send(app, get("/products/details")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));
}

#[tokio::test]
async fn create_form_renders_empty_model() {
    let (app, _) = test_app();

    let (status, _, body) = send(app, get("/products/create")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["model"].is_null());
}

#[tokio::test]
async fn create_post_persists_and_redirects() {
    let (app, repository) = test_app();

    let (status, location, _) = send(
        app,
        post_form("/products/create", "name=Eraser&price=5.5&stock=10&color=White"),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));
    let created = repository.get_by_id(3).await.unwrap().expect("created product");
    assert_eq!(created.name, "Eraser");
    assert_eq!(created.price, 5.5);
}

#[tokio::test]
async fn create_post_with_empty_name_echoes_input() {
    let (app, repository) = test_app();

    let (status, _, body) = send(
        app,
        post_form("/products/create", "name=&price=5&stock=10&color=White"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["color"], "White");
    assert_eq!(body["errors"]["name"][0], "Name is required");
    assert_eq!(repository.get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_post_with_unparseable_price_echoes_input_with_field_error() {
    let (app, repository) = test_app();

    let (status, _, body) = send(
        app,
        post_form("/products/create", "name=Eraser&price=abc&stock=10&color=White"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["name"], "Eraser");
    assert_eq!(body["model"]["stock"], 10);
    assert_eq!(body["errors"]["price"][0], "The value 'abc' is not valid for price.");
    assert_eq!(repository.get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn edit_routes_cover_every_branch() {
    let (app, repository) = test_app();

    let (status, location, _) = send(app.clone(), get("/products/edit")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));

    let (status, _, body) = send(app.clone(), get("/products/edit/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["name"], "Notebook");

    let (status, _, _) = send(
        app.clone(),
        post_form("/products/edit/2", "id=1&name=Pen&price=100&stock=50&color=Red"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(
        app.clone(),
        post_form("/products/edit/1", "id=1&name=&price=100&stock=50&color=Red"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["id"], 1);
    assert_eq!(repository.get_by_id(1).await.unwrap().unwrap().name, "Pen");

    let (status, location, _) = send(
        app,
        post_form("/products/edit/1", "id=1&name=Marker&price=120&stock=40&color=Black"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));
    assert_eq!(
        repository.get_by_id(1).await.unwrap(),
        Some(Product::new(1, "Marker", 120.0, 40, "Black"))
    );
}

#[tokio::test]
async fn edit_post_for_missing_product_surfaces_repository_error() {
    let (app, _) = test_app();

    let (status, _, body) = send(
        app,
        post_form("/products/edit/7", "id=7&name=Ghost&price=1&stock=1&color=Grey"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Resource not found");
}

#[tokio::test]
async fn delete_routes_cover_every_branch() {
    let (app, repository) = test_app();

    let (status, _, _) = send(app.clone(), get("/products/delete")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(app.clone(), get("/products/delete/0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(app.clone(), get("/products/delete/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["id"], 2);

    let (status, location, _) = send(app.clone(), post_form("/products/delete/2", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));
    assert!(repository.get_by_id(2).await.unwrap().is_none());

    let (status, location, _) = send(app, post_form("/products/delete/2", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products"));
}

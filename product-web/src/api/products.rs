use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use crate::controller::{ActionResult, ProductsController};
use crate::domain::models::product::Product;
use crate::domain::validation::ModelState;
use crate::error::AppError;
use crate::server::AppState;

pub const BASE_PATH: &str = "/products";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/details", get(details))
        .route("/details/:id", get(details))
        .route("/create", get(create).post(create_post))
        .route("/edit", get(edit))
        .route("/edit/:id", get(edit).post(edit_post))
        .route("/delete", get(delete))
        .route("/delete/:id", get(delete).post(delete_confirmed))
}

/// 动作名对应的路由, `Index` 即列表页
pub fn action_path(action_name: &str) -> String {
    match action_name {
        "Index" => BASE_PATH.to_string(),
        other => format!("{}/{}", BASE_PATH, other.to_lowercase()),
    }
}

#[derive(Debug, Serialize)]
struct ViewResponse<'a, T> {
    model: Option<T>,
    errors: &'a ModelState,
}

fn render<T: Serialize>(result: ActionResult<T>, model_state: &ModelState) -> Response {
    match result {
        ActionResult::View(view) => Json(ViewResponse {
            model: view.model,
            errors: model_state,
        })
        .into_response(),
        ActionResult::RedirectToAction(redirect) => {
            Redirect::to(&action_path(&redirect.action_name)).into_response()
        }
        ActionResult::NotFound(not_found) => {
            let status = StatusCode::from_u16(not_found.status_code())
                .unwrap_or(StatusCode::NOT_FOUND);
            (status, Json(json!({ "status": status.as_u16() }))).into_response()
        }
    }
}

/// 把表单字段绑定为 `Product`
///
/// 数值字段解析失败或缺失时记录到 `ModelState`, 该字段取默认值, 其余字段照常绑定以便回显。
pub fn bind_product(fields: &HashMap<String, String>) -> (Product, ModelState) {
    let mut model_state = ModelState::valid();

    let text = |name: &str| fields.get(name).cloned().unwrap_or_default();

    let mut product = Product {
        id: 0,
        name: text("name"),
        price: 0.0,
        stock: 0,
        color: text("color"),
    };

    if let Some(id) = fields.get("id").filter(|v| !v.trim().is_empty()) {
        product.id = parse_field(&mut model_state, "id", id);
    }
    product.price = required_field(&mut model_state, fields, "price");
    product.stock = required_field(&mut model_state, fields, "stock");

    if let Err(errors) = product.validate() {
        model_state.merge(ModelState::from(errors));
    }

    (product, model_state)
}

fn required_field<T: FromStr + Default>(
    model_state: &mut ModelState,
    fields: &HashMap<String, String>,
    name: &str,
) -> T {
    match fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(value) => parse_field(model_state, name, value),
        None => {
            model_state.add_model_error(name, format!("The {} field is required.", name));
            T::default()
        }
    }
}

fn parse_field<T: FromStr + Default>(model_state: &mut ModelState, name: &str, value: &str) -> T {
    value.trim().parse().unwrap_or_else(|_| {
        model_state.add_model_error(name, format!("The value '{}' is not valid for {}.", value, name));
        T::default()
    })
}

fn controller(state: &AppState) -> ProductsController {
    ProductsController::new(state.products.clone())
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let result = controller(&state).index().await?;
    Ok(render(result, &ModelState::valid()))
}

async fn details(
    State(state): State<Arc<AppState>>,
    id: Option<Path<i32>>,
) -> Result<Response, AppError> {
    let result = controller(&state).details(id.map(|Path(id)| id)).await?;
    Ok(render(result, &ModelState::valid()))
}

async fn create(State(state): State<Arc<AppState>>) -> Response {
    render(controller(&state).create(), &ModelState::valid())
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let (product, model_state) = bind_product(&fields);
    let result = controller(&state).create_post(product, &model_state).await?;
    Ok(render(result, &model_state))
}

async fn edit(
    State(state): State<Arc<AppState>>,
    id: Option<Path<i32>>,
) -> Result<Response, AppError> {
    let result = controller(&state).edit(id.map(|Path(id)| id)).await?;
    Ok(render(result, &ModelState::valid()))
}

async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let (product, model_state) = bind_product(&fields);
    let result = controller(&state)
        .edit_post(id, product, &model_state)
        .await?;
    Ok(render(result, &model_state))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    id: Option<Path<i32>>,
) -> Result<Response, AppError> {
    let result = controller(&state).delete(id.map(|Path(id)| id)).await?;
    Ok(render(result, &ModelState::valid()))
}

async fn delete_confirmed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let result = controller(&state).delete_confirmed(id).await?;
    Ok(render(result, &ModelState::valid()))
}

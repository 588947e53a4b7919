//! HTTP handlers for Products API

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
        UnprocessableEntityResponse,
    },
    AppError, JsonBody, UuidPath,
};
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{DecimalText, ProductFilterIn, ProductIn, ProductOut, ProductUpdate};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const DEFAULT_MIN_PRICE: &str = "4.500";
pub const DEFAULT_MAX_PRICE: &str = "8.000";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        list_products,
        filter_by_price,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductIn, ProductOut, ProductUpdate, DecimalText),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints.
///
/// Collection routes answer with and without the trailing slash.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/products/", get(list_products).post(create_product))
        .route("/products", get(list_products).post(create_product))
        .route("/products/filter-price/", get(filter_by_price))
        .route("/products/filter-price", get(filter_by_price))
        .route(
            "/products/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(service)
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products/",
    tag = "Products",
    request_body = ProductIn,
    responses(
        (status = 201, description = "Product created successfully", body = ProductOut),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<ProductService<R>>,
    JsonBody(input): JsonBody<ProductIn>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products/",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = Vec<ProductOut>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<ProductService<R>>,
) -> ProductResult<Json<Vec<ProductOut>>> {
    let products = service.query().await?;
    Ok(Json(products))
}

/// Products priced strictly between `min_price` and `max_price`
#[utoipa::path(
    get,
    path = "/products/filter-price/",
    tag = "Products",
    params(ProductFilterIn),
    responses(
        (status = 200, description = "Products inside the price range", body = Vec<ProductOut>),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_by_price<R: ProductRepository>(
    State(service): State<ProductService<R>>,
    query: Result<Query<ProductFilterIn>, QueryRejection>,
) -> Result<Json<Vec<ProductOut>>, AppError> {
    let Query(filter) = query?;
    let products = service.get_by_price(with_default_bounds(filter)).await?;
    Ok(Json(products))
}

fn with_default_bounds(mut filter: ProductFilterIn) -> ProductFilterIn {
    filter
        .min_price
        .get_or_insert_with(|| DecimalText::new(DEFAULT_MIN_PRICE));
    filter
        .max_price
        .get_or_insert_with(|| DecimalText::new(DEFAULT_MAX_PRICE));
    filter
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductOut),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<ProductService<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductOut>> {
    let product = service.get(id).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductOut),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<ProductService<R>>,
    UuidPath(id): UuidPath,
    JsonBody(payload): JsonBody<ProductUpdate>,
) -> ProductResult<Json<ProductOut>> {
    let product = service.update(id, payload).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<ProductService<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

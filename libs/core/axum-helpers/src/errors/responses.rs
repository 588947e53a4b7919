//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "detail": "Internal Server Error" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid input",
    content_type = "application/json",
    example = json!({
        "detail": "errors: [{\"type\":\"decimal_parsing\",\"loc\":[\"price\"],\"msg\":\"Input should be a valid decimal\",\"input\":\"incorrect value\"}]"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({ "detail": "Invalid UUID: not-a-uuid" })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "detail": "Product not found with filter: 1e4f214e-85f7-461a-89d0-a751a32e3bb9" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Malformed body",
    content_type = "application/json",
    example = json!({ "detail": "Failed to deserialize the JSON body into the target type: missing field `name`" })
)]
pub struct UnprocessableEntityResponse(pub ErrorResponse);

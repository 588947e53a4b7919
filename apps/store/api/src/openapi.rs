//! OpenAPI documentation configuration

use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the Store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Product management API backed by MongoDB",
        license(name = "MIT")
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    modifiers(&ProductPaths)
)]
pub struct ApiDoc;

/// Products routes are mounted at the root, so their paths are merged as-is.
struct ProductPaths;

impl Modify for ProductPaths {
    fn modify(&self, openapi: &mut OpenApiSpec) {
        openapi.merge(domain_products::ApiDoc::openapi());
    }
}

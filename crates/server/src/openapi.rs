use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest { pub username: String, pub password: String, pub full_name: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image: String,
}

/// Price may be a number or a numeric string.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::admin_login,
        crate::routes::auth::admin_logout,
        crate::routes::auth::me,
        crate::routes::auth::register,
        crate::routes::auth::user_login,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::admin::create_product,
        crate::routes::admin::update_product,
        crate::routes::admin::delete_product,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ProductDoc,
            ProductInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "products"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/products"));
        assert!(paths.contains_key("/api/products/{id}"));
        assert!(paths.contains_key("/api/users/register"));
    }
}

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub fitness_level: String,
}

#[derive(ToSchema, serde::Deserialize)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::register,
        crate::auth::login,
        crate::auth::profile,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
    )
)]
pub struct ApiDoc;

use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::middleware::auth as auth_middleware;
use crate::middleware::authorization::{self, RequiredRoles};
use crate::routes::{auth, health, profile};
use crate::service::mailer::Mailer;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use crate::state::auth_state::AuthState;
use crate::state::token_state::TokenState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn routes(db_conn: Arc<Database>, mailer: Arc<dyn Mailer>) -> Result<Router, TokenError> {
    let token_service = TokenService::from_parameters()?;

    let merged_router = {
        let auth_state = AuthState::new(&db_conn, token_service.clone(), mailer);
        let token_state = TokenState::new(&db_conn, token_service);

        auth::routes()
            .with_state(auth_state)
            .merge(
                profile::routes().layer(
                    ServiceBuilder::new()
                        .layer(middleware::from_fn_with_state(
                            token_state,
                            auth_middleware::auth,
                        ))
                        .layer(middleware::from_fn_with_state(
                            RequiredRoles::any_member(),
                            authorization::require_role,
                        )),
                ),
            )
            .merge(health::routes().with_state(db_conn.clone()))
    };

    let app_router = Router::new()
        .nest("/api", merged_router)
        .layer(TraceLayer::new_for_http());

    Ok(app_router)
}

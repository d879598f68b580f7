use axum::Router;
use domain_users::{PgUserRepository, SystemClock, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository, SystemClock);
    handlers::router(service)
}

use std::sync::Arc;

use axum::http::HeaderValue;
use competition::Competition;

use crate::config::AdminCredentials;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) competition: Arc<Competition>,
    pub(crate) admin: AdminCredentials,
    pub(crate) frontend_origin: HeaderValue,
}

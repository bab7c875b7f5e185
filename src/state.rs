use crate::config::AppConfig;
use crate::services::auth::TokenService;
use crate::services::discord::MemberDirectory;
use crate::services::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub tokens: TokenService,
    pub directory: Arc<dyn MemberDirectory>,
}

use axum::extract::FromRef;

use crate::repository::DynRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: DynRepository,
}

impl AppState {
    pub fn new(repository: DynRepository) -> Self {
        Self { repository }
    }
}

impl FromRef<AppState> for DynRepository {
    fn from_ref(state: &AppState) -> Self {
        state.repository.clone()
    }
}

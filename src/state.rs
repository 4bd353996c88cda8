use crate::services::UserService;

/// Application state shared across all HTTP handlers
///
/// Holds the user service with its injected storage backend.
#[derive(Clone)]
pub struct AppState {
    /// User service handling all business logic
    pub users: UserService,
}

impl AppState {
    /// Create a new AppState instance
    ///
    /// # Arguments
    /// * `users` - User service to expose to handlers
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

//! Shared application state handed to handlers through an `Extension`.

use std::sync::Arc;

use booking_auth::PolicyRegistry;
use booking_infra::RepositoryRegistry;

pub struct AppServices {
    pub registry: Arc<RepositoryRegistry>,
    pub policies: PolicyRegistry,
}

impl AppServices {
    pub fn new(registry: Arc<RepositoryRegistry>, policies: PolicyRegistry) -> Self {
        Self { registry, policies }
    }
}

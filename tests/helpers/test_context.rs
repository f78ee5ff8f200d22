//! Test context for unified test setup
//!
//! Bundles the mock API server, a temporary credential directory and
//! settings pointing at both.

use eventdesk::config::Settings;
use eventdesk::models::Role;
use eventdesk::state::{AppContext, CredentialStore, SessionContext};
use tempfile::TempDir;

use super::{api_mock::ApiMockServer, test_data::create_test_token};

pub struct TestContext {
    pub api: ApiMockServer,
    pub settings: Settings,
    pub store: CredentialStore,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let temp_dir = tempfile::tempdir()?;
        let api = ApiMockServer::new().await;

        let mut settings = Settings::default();
        settings.api.base_url = api.uri();
        settings.api.timeout_seconds = 5;
        settings.session.credential_path = temp_dir
            .path()
            .join("credential")
            .to_string_lossy()
            .into_owned();

        let store = CredentialStore::new(&settings.session.credential_path);

        Ok(Self {
            api,
            settings,
            store,
            temp_dir,
        })
    }

    /// Session for `user_id` with `role`
    pub fn session(&self, user_id: &str, role: Role) -> SessionContext {
        let token = create_test_token(user_id, "Test User", role.as_str());
        SessionContext::from_credential(&token).expect("Failed to decode test token")
    }

    /// Application context for `user_id` with `role`, talking to the mock API
    pub fn app_context(&self, user_id: &str, role: Role) -> AppContext {
        AppContext::new(self.settings.clone(), self.session(user_id, role)).expect("Failed to build app context")
    }
}

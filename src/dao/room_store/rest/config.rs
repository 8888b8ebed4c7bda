use super::error::{RestDaoError, RestResult};

/// Runtime configuration describing how to reach the hosted datastore.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the datastore project.
    pub base_url: String,
    /// Service credential with write access to the room collection.
    pub service_key: String,
}

impl RestConfig {
    /// Construct a configuration from an explicit URL and credential.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> RestResult<Self> {
        let base_url = std::env::var("SUPABASE_URL").map_err(|_| RestDaoError::MissingEnvVar {
            var: "SUPABASE_URL",
        })?;
        let service_key =
            std::env::var("SUPABASE_SERVICE_ROLE_KEY").map_err(|_| RestDaoError::MissingEnvVar {
                var: "SUPABASE_SERVICE_ROLE_KEY",
            })?;

        Ok(Self::new(base_url, service_key))
    }
}

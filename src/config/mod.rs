use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub collaborators: CollaboratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub enable_cors: bool,
}

/// Base URLs of the sibling services this instance calls out to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    pub course_directory_url: String,
    pub contract_directory_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, specific env vars override
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        if let Ok(v) = env::var("COURSE_DIRECTORY_URL") {
            self.collaborators.course_directory_url = v;
        }
        if let Ok(v) = env::var("CONTRACT_DIRECTORY_URL") {
            self.collaborators.contract_directory_url = v;
        }
        if let Ok(v) = env::var("COLLABORATOR_TIMEOUT_SECS") {
            self.collaborators.request_timeout_secs =
                v.parse().unwrap_or(self.collaborators.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret-do-not-deploy".to_string(),
                enable_cors: true,
            },
            collaborators: CollaboratorConfig {
                course_directory_url: "http://localhost:8082".to_string(),
                contract_directory_url: "http://localhost:8083".to_string(),
                request_timeout_secs: 10,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                // Must be supplied via JWT_SECRET
                jwt_secret: String::new(),
                enable_cors: true,
            },
            collaborators: CollaboratorConfig {
                course_directory_url: "http://course-directory:8082".to_string(),
                contract_directory_url: "http://contract-directory:8083".to_string(),
                request_timeout_secs: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                enable_cors: false,
            },
            collaborators: CollaboratorConfig {
                course_directory_url: "http://course-directory:8082".to_string(),
                contract_directory_url: "http://contract-directory:8083".to_string(),
                request_timeout_secs: 10,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

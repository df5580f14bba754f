use crate::config::LoggerConfig;
use serde_json::{json, Value};

pub const DEFAULT_NOTICE_HOST: &str = "https://api.airbrake.io";

/// Where unexpected errors end up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorLogger {
    #[default]
    Console,
    Airbrake {
        host: String,
        project_id: String,
        project_key: String,
    },
}

impl ErrorLogger {
    pub fn from_config(config: Option<&LoggerConfig>) -> Self {
        match config {
            Some(logger) if !logger.api_key.is_empty() => {
                let host = logger.host.trim().trim_end_matches('/');
                ErrorLogger::Airbrake {
                    host: if host.is_empty() {
                        DEFAULT_NOTICE_HOST.to_string()
                    } else {
                        host.to_string()
                    },
                    project_id: logger
                        .project_id
                        .clone()
                        .unwrap_or_else(|| logger.api_key.clone()),
                    project_key: logger.api_key.clone(),
                }
            }
            _ => ErrorLogger::Console,
        }
    }
}

/// Body of an Airbrake v3 notice.
pub fn notice(message: &str, page_url: &str) -> Value {
    json!({
        "errors": [{
            "type": "Error",
            "message": message,
            "backtrace": [],
        }],
        "context": {
            "notifier": {
                "name": "admin-client",
                "version": env!("CARGO_PKG_VERSION"),
                "url": "https://github.com/seed-rs/seed",
            },
            "url": page_url,
            "severity": "error",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_without_settings() {
        assert_eq!(ErrorLogger::from_config(None), ErrorLogger::Console);
        let blank = LoggerConfig {
            host: "https://errors.example.org".to_string(),
            api_key: String::new(),
            project_id: None,
        };
        assert_eq!(ErrorLogger::from_config(Some(&blank)), ErrorLogger::Console);
    }

    #[test]
    fn api_key_doubles_as_project_id() {
        let config = LoggerConfig {
            host: String::new(),
            api_key: "abc".to_string(),
            project_id: None,
        };
        assert_eq!(
            ErrorLogger::from_config(Some(&config)),
            ErrorLogger::Airbrake {
                host: DEFAULT_NOTICE_HOST.to_string(),
                project_id: "abc".to_string(),
                project_key: "abc".to_string(),
            }
        );
    }

    #[test]
    fn notice_carries_message_and_page() {
        let body = notice("could not load", "https://host/admin");
        assert_eq!(body["errors"][0]["message"], "could not load");
        assert_eq!(body["context"]["url"], "https://host/admin");
    }
}

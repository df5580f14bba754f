use crate::enterprise::Status;
use crate::form::Mutation;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered 403: the session is gone.
    #[error("not authenticated")]
    Forbidden,
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Classifies a non-success response, preferring the server's own message.
    pub fn from_status(code: u16, status_text: &str, body: &str) -> Self {
        if code == 403 {
            return ApiError::Forbidden;
        }

        let message = server_message(body)
            .or_else(|| {
                let text = status_text.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {}", code));

        ApiError::Status { code, message }
    }
}

fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => ["message", "error"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(message)) => Some(message),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// Paths of the directory REST API below its root.
#[derive(Debug, Clone)]
pub struct Endpoints<'a> {
    root: &'a str,
}

impl<'a> Endpoints<'a> {
    pub fn new(root: &'a str) -> Self {
        Endpoints {
            root: root.trim_end_matches('/'),
        }
    }

    pub fn permissions(&self) -> String {
        format!("{}/account/permissions", self.root)
    }

    pub fn login(&self) -> String {
        format!("{}/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/logout", self.root)
    }

    pub fn enterprise(&self, id: u64) -> String {
        format!("{}/enterprise/{}", self.root, id)
    }

    pub fn logo(&self, id: u64) -> String {
        format!("{}/enterprise/{}/logo", self.root, id)
    }

    pub fn admins(&self, id: u64) -> String {
        format!("{}/enterprise/{}/admins", self.root, id)
    }

    pub fn admin(&self, id: u64, admin_id: u64) -> String {
        format!("{}/enterprise/{}/admins/{}", self.root, id, admin_id)
    }

    pub fn mutation(&self, mutation: Mutation, id: u64, status: Status) -> (Verb, String) {
        let record = format!("{}/enterprise/{}/{}", self.root, status, id);
        match mutation {
            Mutation::Save | Mutation::SubmitForApproval => (Verb::Put, record),
            Mutation::Publish => (Verb::Post, format!("{}/publish", record)),
            Mutation::Unpublish => (Verb::Post, format!("{}/unpublish", record)),
            Mutation::Delete => (Verb::Delete, record),
        }
    }
}

//! Errors returned by the REST session and entity models

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestError {
    // ========================================================================
    // Local checks
    // ========================================================================
    #[error("{0} has no ID; it must be created or fetched first")]
    MissingIdentifier(&'static str),

    #[error("No current session; call Session::set_current first")]
    NoCurrentSession,

    #[error("Session is not started")]
    NotStarted,

    #[error("Invalid session configuration: {0}")]
    Config(String),

    // ========================================================================
    // Transport
    // ========================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ========================================================================
    // Controller replies
    // ========================================================================
    #[error("Controller returned {status}: {title}{}", describe(.description))]
    Controller {
        status: u16,
        title: String,
        description: String,
    },

    #[error("Authentication reply carried no API key")]
    MissingApiKey,

    #[error("Controller returned no {0} in its reply")]
    EmptyResponse(&'static str),

    #[error("Failed to decode controller reply: {0}")]
    Decode(#[from] serde_json::Error),
}

fn describe(description: &str) -> String {
    if description.is_empty() {
        String::new()
    } else {
        format!(" ({})", description)
    }
}

impl RestError {
    /// Build a controller error from a failed reply.
    ///
    /// The controller answers either `{"title", "description"}` or
    /// `{"errors": [{"descriptions": [{"title", "description"}]}]}`; anything
    /// else is kept verbatim as the description.
    pub fn from_reply(status: u16, reason: &str, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message);

        let (title, description) = match parsed {
            Some(message) => message,
            None => (reason.to_string(), body.trim().to_string()),
        };

        RestError::Controller {
            status,
            title,
            description,
        }
    }

    /// HTTP status of a controller error
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Controller { status, .. } => Some(*status),
            RestError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    errors: Vec<PropertyError>,
}

#[derive(Deserialize)]
struct PropertyError {
    #[serde(default)]
    descriptions: Vec<Description>,
}

#[derive(Deserialize)]
struct Description {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl ErrorBody {
    fn into_message(self) -> Option<(String, String)> {
        if let Some(title) = self.title {
            return Some((title, self.description.unwrap_or_default()));
        }
        self.errors
            .into_iter()
            .flat_map(|e| e.descriptions)
            .next()
            .map(|d| (d.title, d.description))
    }
}

/// Result type alias for the REST API
pub type Result<T> = std::result::Result<T, RestError>;

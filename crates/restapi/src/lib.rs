//! Client of the event settings resources of the Instana Web REST API.

mod client;
mod resources;

pub use client::{new_http_client, Client};
pub use resources::{
    DataObject, InstanaApi, RestResource, ALERTING_CHANNELS_RESOURCE_PATH,
    CUSTOM_EVENT_SPECIFICATION_RESOURCE_PATH, EVENT_SETTINGS_BASE_PATH,
    EVENT_SPECIFICATION_BASE_PATH,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid Instana endpoint: '{0}'")]
    InvalidEndpoint(String),
    #[error("entity not found")]
    NotFound,
    #[error("{method} {url}: {status}: {body}")]
    Status {
        method: reqwest::Method,
        url: url::Url,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response of {url}")]
    Decode {
        url: url::Url,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] models::Error),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

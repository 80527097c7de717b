use super::{Client, Error};
use models::{AlertingChannel, CustomEventSpecification};
use std::marker::PhantomData;

/// Path to the event settings of the Instana Web REST API.
pub const EVENT_SETTINGS_BASE_PATH: &str = "/api/events/settings";
/// Path to event specifications.
pub const EVENT_SPECIFICATION_BASE_PATH: &str = "/api/events/settings/event-specifications";
/// Path to custom event specifications.
pub const CUSTOM_EVENT_SPECIFICATION_RESOURCE_PATH: &str =
    "/api/events/settings/event-specifications/custom";
/// Path to alerting channels.
pub const ALERTING_CHANNELS_RESOURCE_PATH: &str = "/api/events/settings/alertingChannels";

/// DataObject is an entity which is managed through a REST resource of the API.
pub trait DataObject: serde::Serialize + serde::de::DeserializeOwned + Send + Sync {
    /// Path of the REST resource under which objects are addressed by ID.
    const RESOURCE_PATH: &'static str;

    fn id(&self) -> &str;
    fn validate(&self) -> Result<(), models::Error>;
}

impl DataObject for CustomEventSpecification {
    const RESOURCE_PATH: &'static str = CUSTOM_EVENT_SPECIFICATION_RESOURCE_PATH;

    fn id(&self) -> &str {
        CustomEventSpecification::id(self)
    }
    fn validate(&self) -> Result<(), models::Error> {
        CustomEventSpecification::validate(self)
    }
}

impl DataObject for AlertingChannel {
    const RESOURCE_PATH: &'static str = ALERTING_CHANNELS_RESOURCE_PATH;

    fn id(&self) -> &str {
        AlertingChannel::id(self)
    }
    fn validate(&self) -> Result<(), models::Error> {
        AlertingChannel::validate(self)
    }
}

/// RestResource performs CRUD operations over objects of type T.
/// Objects are validated before they're written, and after they're read.
pub struct RestResource<T> {
    client: Client,
    _object: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _object: PhantomData,
        }
    }
}

impl<T: DataObject> RestResource<T> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _object: PhantomData,
        }
    }

    #[tracing::instrument(skip(self), fields(path = T::RESOURCE_PATH), err)]
    pub async fn get_one(&self, id: &str) -> Result<T, Error> {
        let object: T = self.client.get(T::RESOURCE_PATH, id).await?;
        object.validate()?;
        Ok(object)
    }

    /// Create or update `object`, returning its current state.
    /// Invalid objects are never sent.
    #[tracing::instrument(skip_all, fields(path = T::RESOURCE_PATH, id = object.id()), err)]
    pub async fn upsert(&self, object: &T) -> Result<T, Error> {
        object.validate()?;

        let updated: T = self.client.put(T::RESOURCE_PATH, object.id(), object).await?;
        updated.validate()?;
        Ok(updated)
    }

    pub async fn delete(&self, object: &T) -> Result<(), Error> {
        self.delete_by_id(object.id()).await
    }

    #[tracing::instrument(skip(self), fields(path = T::RESOURCE_PATH), err)]
    pub async fn delete_by_id(&self, id: &str) -> Result<(), Error> {
        self.client.delete(T::RESOURCE_PATH, id).await
    }
}

/// InstanaApi exposes the REST resources of the Instana Web REST API.
#[derive(Clone, Debug)]
pub struct InstanaApi {
    client: Client,
}

impl InstanaApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn custom_event_specifications(&self) -> RestResource<CustomEventSpecification> {
        RestResource::new(self.client.clone())
    }

    pub fn alerting_channels(&self) -> RestResource<AlertingChannel> {
        RestResource::new(self.client.clone())
    }
}

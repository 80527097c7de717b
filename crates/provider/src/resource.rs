use super::{ResourceData, ResourceNameFormatter, Schema};
use anyhow::Context;
use restapi::{DataObject, InstanaApi, RestResource};

/// ResourceHandle describes a kind of resource managed by the provider:
/// its declarative schema, and the mapping between its declarative
/// definition and the domain object exchanged with the Instana API.
pub trait ResourceHandle: Send + Sync + 'static {
    type Object: DataObject;

    /// Name of the resource type, as known to the host.
    fn resource_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// REST resource through which objects of this kind are managed.
    fn rest_resource(&self, api: &InstanaApi) -> RestResource<Self::Object>;

    /// Map a declarative definition into its domain object.
    /// The definition has already been validated against schema().
    fn to_domain_object(
        &self,
        data: &ResourceData,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<Self::Object>;

    /// Map a domain object into its declarative definition, including
    /// computed fields.
    fn from_domain_object(
        &self,
        object: &Self::Object,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<ResourceData>;
}

/// ResourceOperations are the life-cycle operations which the host drives
/// for each declared resource.
#[async_trait::async_trait]
pub trait ResourceOperations: Send + Sync {
    fn resource_name(&self) -> &'static str;
    fn schema(&self) -> Schema;

    async fn create(&self, data: ResourceData) -> anyhow::Result<ResourceData>;
    async fn read(&self, data: ResourceData) -> anyhow::Result<ResourceData>;
    async fn update(&self, data: ResourceData) -> anyhow::Result<ResourceData>;
    async fn delete(&self, data: ResourceData) -> anyhow::Result<()>;
}

/// Resource drives the life-cycle of resources described by a ResourceHandle.
pub struct Resource<H: ResourceHandle> {
    handle: H,
    rest: RestResource<H::Object>,
    formatter: ResourceNameFormatter,
}

impl<H: ResourceHandle> Resource<H> {
    pub fn new(handle: H, api: &InstanaApi, formatter: ResourceNameFormatter) -> Self {
        let rest = handle.rest_resource(api);
        Self {
            handle,
            rest,
            formatter,
        }
    }

    /// Map `data` into a domain object, after applying defaults
    /// and verifying it against the schema.
    fn to_object(&self, data: &ResourceData) -> anyhow::Result<H::Object> {
        let schema = self.handle.schema();
        let mut data = data.clone();

        schema.apply_defaults(&mut data);
        schema.validate(&data)?;

        self.handle.to_domain_object(&data, &self.formatter)
    }

    async fn upsert(&self, data: ResourceData) -> anyhow::Result<ResourceData> {
        let object = self.to_object(&data)?;
        let updated = self.rest.upsert(&object).await?;
        tracing::debug!(id = updated.id(), "upserted resource");

        self.handle.from_domain_object(&updated, &self.formatter)
    }
}

#[async_trait::async_trait]
impl<H: ResourceHandle> ResourceOperations for Resource<H> {
    fn resource_name(&self) -> &'static str {
        self.handle.resource_name()
    }

    fn schema(&self) -> Schema {
        self.handle.schema()
    }

    #[tracing::instrument(skip_all, fields(resource = self.handle.resource_name()))]
    async fn create(&self, mut data: ResourceData) -> anyhow::Result<ResourceData> {
        data.set_id(uuid::Uuid::new_v4().to_string());

        self.upsert(data)
            .await
            .with_context(|| format!("failed to create {}", self.handle.resource_name()))
    }

    #[tracing::instrument(skip_all, fields(resource = self.handle.resource_name(), id = data.id()))]
    async fn read(&self, mut data: ResourceData) -> anyhow::Result<ResourceData> {
        if data.id().is_empty() {
            anyhow::bail!("ID of {} is missing", self.handle.resource_name());
        }

        match self.rest.get_one(data.id()).await {
            Ok(object) => self.handle.from_domain_object(&object, &self.formatter),
            Err(err) if err.is_not_found() => {
                tracing::warn!("resource no longer exists and is removed from the state");
                data.set_id("");
                Ok(data)
            }
            Err(err) => Err(err).with_context(|| {
                format!(
                    "failed to read {} {}",
                    self.handle.resource_name(),
                    data.id()
                )
            }),
        }
    }

    #[tracing::instrument(skip_all, fields(resource = self.handle.resource_name(), id = data.id()))]
    async fn update(&self, data: ResourceData) -> anyhow::Result<ResourceData> {
        let id = data.id().to_string();

        self.upsert(data)
            .await
            .with_context(|| format!("failed to update {} {id}", self.handle.resource_name()))
    }

    #[tracing::instrument(skip_all, fields(resource = self.handle.resource_name(), id = data.id()))]
    async fn delete(&self, data: ResourceData) -> anyhow::Result<()> {
        let object = self.to_object(&data)?;

        self.rest.delete(&object).await.with_context(|| {
            format!(
                "failed to delete {} {}",
                self.handle.resource_name(),
                data.id()
            )
        })
    }
}

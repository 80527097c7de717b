use super::{
    logging, AlertingChannelHandle, CustomEventSpecificationHandle, ProviderConfig, Resource,
    ResourceNameFormatter, ResourceOperations,
};
use anyhow::Context;
use restapi::{Client, InstanaApi};
use std::collections::BTreeMap;
use validator::Validate;

/// Provider is a configured Instana provider, exposing the life-cycle
/// operations of each of its resource types.
pub struct Provider {
    resources: BTreeMap<&'static str, Box<dyn ResourceOperations>>,
}

impl Provider {
    /// Configure a Provider which talks to the Instana tenant unit of `config`.
    #[tracing::instrument(skip_all, fields(endpoint = %config.endpoint))]
    pub fn configure(config: ProviderConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .context("invalid provider configuration")?;
        logging::init(&config.log_level)?;

        let client = Client::new(&config.endpoint, &config.api_token)
            .context("failed to build Instana API client")?;
        let formatter =
            ResourceNameFormatter::new(config.default_name_prefix, config.default_name_suffix);

        tracing::info!("configured Instana provider");
        Ok(Self::with_api(InstanaApi::new(client), formatter))
    }

    /// Build a Provider over an already-constructed InstanaApi.
    pub fn with_api(api: InstanaApi, formatter: ResourceNameFormatter) -> Self {
        let mut resources: BTreeMap<&'static str, Box<dyn ResourceOperations>> = BTreeMap::new();

        for handle in CustomEventSpecificationHandle::all() {
            let resource = Resource::new(handle, &api, formatter.clone());
            resources.insert(resource.resource_name(), Box::new(resource));
        }
        for handle in AlertingChannelHandle::all() {
            let resource = Resource::new(handle, &api, formatter.clone());
            resources.insert(resource.resource_name(), Box::new(resource));
        }

        Self { resources }
    }

    /// Resource types of the provider, keyed on their names.
    pub fn resources(&self) -> &BTreeMap<&'static str, Box<dyn ResourceOperations>> {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> anyhow::Result<&dyn ResourceOperations> {
        self.resources
            .get(name)
            .map(|resource| resource.as_ref())
            .with_context(|| format!("resource type {name} is not supported"))
    }
}

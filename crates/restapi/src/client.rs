use super::Error;

/// Client composes the base URL of an Instana tenant unit,
/// its API token, and an HTTP client.
#[derive(Clone)]
pub struct Client {
    // Base URL of the Instana Web REST API.
    base_url: url::Url,
    // Token used to authorize every request.
    api_token: String,
    // HTTP client to use for REST requests.
    http_client: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build a Client of the tenant unit at `endpoint`, which is a host name
    /// like "tenant-unit.instana.io" without a URL scheme.
    pub fn new(endpoint: &str, api_token: &str) -> Result<Self, Error> {
        let base_url = url::Url::parse(&format!("https://{endpoint}"))
            .map_err(|_| Error::InvalidEndpoint(endpoint.to_string()))?;

        if endpoint.is_empty() || base_url.host_str().is_none() {
            return Err(Error::InvalidEndpoint(endpoint.to_string()));
        }
        Self::with_base_url(base_url, api_token)
    }

    /// Build a Client using a complete base URL, such as a local test server.
    pub fn with_base_url(base_url: url::Url, api_token: &str) -> Result<Self, Error> {
        Ok(Self {
            base_url,
            api_token: api_token.to_string(),
            http_client: new_http_client(concat!("instana-provider/", env!("CARGO_PKG_VERSION")))?,
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Performs a GET of the resource `id` under `path`
    /// and returns its deserialized body.
    pub async fn get<T>(&self, path: &str, id: &str) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.resource_url(path, id)?;
        let builder = self.http_client.get(url.clone());
        let body = self.execute(reqwest::Method::GET, url.clone(), builder).await?;
        decode(url, &body)
    }

    /// Performs a PUT of `object` as the resource `id` under `path`
    /// and returns the object as echoed by the API.
    pub async fn put<T>(&self, path: &str, id: &str, object: &T) -> Result<T, Error>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let url = self.resource_url(path, id)?;
        let builder = self.http_client.put(url.clone()).json(object);
        let body = self.execute(reqwest::Method::PUT, url.clone(), builder).await?;
        decode(url, &body)
    }

    /// Performs a DELETE of the resource `id` under `path`.
    pub async fn delete(&self, path: &str, id: &str) -> Result<(), Error> {
        let url = self.resource_url(path, id)?;
        let builder = self.http_client.delete(url.clone());
        self.execute(reqwest::Method::DELETE, url, builder).await?;
        Ok(())
    }

    fn resource_url(&self, path: &str, id: &str) -> Result<url::Url, Error> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| Error::InvalidEndpoint(self.base_url.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);

        Ok(url)
    }

    async fn execute(
        &self,
        method: reqwest::Method,
        url: url::Url,
        builder: reqwest::RequestBuilder,
    ) -> Result<bytes::Bytes, Error> {
        let request = builder
            .header(
                reqwest::header::AUTHORIZATION,
                format!("apiToken {}", self.api_token),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .build()?;
        tracing::debug!(url = %request.url(), %method, "sending request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            Err(Error::NotFound)
        } else if status.is_success() {
            Ok(response.bytes().await?)
        } else {
            let body = response.text().await?;
            Err(Error::Status {
                method,
                url,
                status,
                body,
            })
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(url: url::Url, body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|source| Error::Decode { url, source })
}

pub fn new_http_client(user_agent: &str) -> Result<reqwest::Client, Error> {
    Ok(reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()?)
}

#[cfg(test)]
mod test {
    use super::Client;

    #[test]
    fn test_resource_urls() {
        let client = Client::new("tenant-unit.instana.io", "token").unwrap();
        assert_eq!(client.base_url().as_str(), "https://tenant-unit.instana.io/");

        let url = client
            .resource_url("/api/events/settings/alertingChannels", "abc/def 1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://tenant-unit.instana.io/api/events/settings/alertingChannels/abc%2Fdef%201"
        );
    }

    #[test]
    fn test_invalid_endpoints() {
        for endpoint in ["", "exa mple.com"] {
            let err = Client::new(endpoint, "token").unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("invalid Instana endpoint: '{endpoint}'")
            );
        }
    }
}

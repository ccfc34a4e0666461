//! Huntress API client
//!
//! [`HuntressClient`] owns its configuration, its transport and, after
//! [`HuntressClient::login`], its credentials. Collection endpoints are walked
//! with a [`Pager`]; single records are fetched with one GET. Both unwrap the
//! response envelope with [`into_payload`].

use crate::auth::{AuthConfig, Authenticator};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig, Transport};
use crate::pagination::{into_payload, Pager, Paginator};
use crate::resources::Resource;
use crate::types::{JsonValue, QueryParams};
use futures::stream::{self, Stream, TryStreamExt};
use std::fmt;
use tracing::{debug, info, warn};

/// Version prefix of every API path
pub const API_VERSION_PREFIX: &str = "/v1";

/// Client for the Huntress REST API
pub struct HuntressClient<T: Transport = HttpClient> {
    config: ClientConfig,
    transport: T,
    authenticator: Option<Authenticator>,
}

impl HuntressClient<HttpClient> {
    /// Create a client backed by the HTTP transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpClient::with_config(config.http_config())?;
        Self::with_transport(config, transport)
    }

    /// Create a client from `HUNTRESS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> HuntressClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            authenticator: None,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether credentials have been installed by [`HuntressClient::login`]
    pub fn is_authenticated(&self) -> bool {
        self.authenticator.is_some()
    }

    /// Full API path for a resource path
    pub fn api_url(&self, path: &str) -> String {
        format!("{API_VERSION_PREFIX}/{}", path.trim_start_matches('/'))
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Install basic credentials and verify them against `/v1/account`.
    ///
    /// Missing credentials fail with [`Error::MissingConfigField`] before any
    /// request is made; a rejected request fails with
    /// [`Error::Authentication`].
    pub async fn login(&mut self) -> Result<JsonValue> {
        let client_id = self
            .config
            .client_id
            .clone()
            .ok_or_else(|| Error::missing_field("client_id"))?;
        let client_secret = self
            .config
            .client_secret
            .clone()
            .ok_or_else(|| Error::missing_field("client_secret"))?;

        self.authenticator = Some(Authenticator::new(AuthConfig::basic(
            client_id,
            client_secret,
        )));

        match self.account(QueryParams::new()).await {
            Ok(account) => {
                info!(endpoint = %self.config.endpoint, "logged in");
                Ok(account)
            }
            Err(e) => {
                self.authenticator = None;
                if e.is_transport() {
                    Err(Error::authentication(e.to_string()))
                } else {
                    Err(e)
                }
            }
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    async fn request(&self, path: &str, params: QueryParams) -> Result<JsonValue> {
        let mut request = RequestConfig::new().merge_query(params);
        if let Some(auth) = &self.authenticator {
            request = auth.apply(request);
        }
        self.transport.get_json(path, request).await
    }

    /// Fetch a single response and unwrap its envelope
    pub async fn get(&self, path: &str, params: QueryParams) -> Result<JsonValue> {
        let body = self.request(path, params).await?;
        Ok(into_payload(body))
    }

    /// Start a traversal with the configured page size and termination rule
    pub fn pager(&self) -> Result<Pager> {
        Pager::with_termination(self.config.page_size, self.config.termination)
    }

    /// Stream the payload of every page of a collection.
    ///
    /// Each item is the unwrapped payload of one page, usually an array.
    /// The caller's params are merged under the pager's `limit` and
    /// `page_token`.
    ///
    /// Whatever the termination rule, a page after the first is only
    /// requested with a fresh, non-empty cursor. A missing or repeated token
    /// ends the stream with a warning instead of refetching the same page.
    pub fn paged_stream<'a>(
        &'a self,
        path: &'a str,
        params: QueryParams,
    ) -> Result<impl Stream<Item = Result<JsonValue>> + 'a> {
        let pager = self.pager()?;

        Ok(stream::try_unfold(
            (pager, params, None::<String>),
            move |(mut pager, params, last_cursor)| async move {
                if !pager.has_more_pages() {
                    debug!(path, pages = pager.page() - 1, "pagination finished");
                    return Ok(None);
                }

                if pager.page() > 1 {
                    match pager.cursor().filter(|cursor| !cursor.is_empty()) {
                        None => {
                            warn!(
                                path,
                                page = pager.page(),
                                "pagination metadata without next_page_token, stopping"
                            );
                            return Ok(None);
                        }
                        Some(cursor) if last_cursor.as_deref() == Some(cursor) => {
                            warn!(
                                path,
                                page = pager.page(),
                                cursor,
                                "page_token repeated, stopping"
                            );
                            return Ok(None);
                        }
                        Some(_) => {}
                    }
                }

                let mut query = params.clone();
                query.extend(pager.page_params());
                debug!(path, page = pager.page(), cursor = ?pager.cursor(), "fetching page");

                let sent_cursor = pager.cursor().map(str::to_owned);
                let body = self.request(path, query).await?;
                pager.advance(&body);
                Ok(Some((into_payload(body), (pager, params, sent_cursor))))
            },
        ))
    }

    /// Fetch every page of a collection.
    ///
    /// Array payloads are concatenated; any other payload counts as one
    /// record.
    pub async fn get_paged(&self, path: &str, params: QueryParams) -> Result<Vec<JsonValue>> {
        let pages: Vec<JsonValue> = self.paged_stream(path, params)?.try_collect().await?;

        let mut records = Vec::new();
        for page in pages {
            match page {
                JsonValue::Array(items) => records.extend(items),
                other => records.push(other),
            }
        }
        Ok(records)
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Every record of a resource collection
    pub async fn list(&self, resource: Resource, params: QueryParams) -> Result<Vec<JsonValue>> {
        let path = self.api_url(resource.collection_path());
        self.get_paged(&path, params).await
    }

    /// One record of a resource
    pub async fn fetch(
        &self,
        resource: Resource,
        id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<JsonValue> {
        let path = self.api_url(&resource.member_path(id));
        self.get(&path, params).await
    }

    /// The account the credentials belong to
    pub async fn account(&self, params: QueryParams) -> Result<JsonValue> {
        self.get(&self.api_url("account"), params).await
    }

    /// The user or API key performing the requests
    pub async fn actor(&self, params: QueryParams) -> Result<JsonValue> {
        self.get(&self.api_url("actor"), params).await
    }

    pub async fn agents(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::Agents, params).await
    }

    pub async fn agent(&self, id: impl fmt::Display, params: QueryParams) -> Result<JsonValue> {
        self.fetch(Resource::Agents, id, params).await
    }

    pub async fn billing_reports(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::BillingReports, params).await
    }

    pub async fn billing_report(
        &self,
        id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<JsonValue> {
        self.fetch(Resource::BillingReports, id, params).await
    }

    pub async fn incident_reports(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::IncidentReports, params).await
    }

    pub async fn incident_report(
        &self,
        id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<JsonValue> {
        self.fetch(Resource::IncidentReports, id, params).await
    }

    pub async fn organizations(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::Organizations, params).await
    }

    pub async fn organization(
        &self,
        id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<JsonValue> {
        self.fetch(Resource::Organizations, id, params).await
    }

    pub async fn reports(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::Reports, params).await
    }

    pub async fn report(&self, id: impl fmt::Display, params: QueryParams) -> Result<JsonValue> {
        self.fetch(Resource::Reports, id, params).await
    }

    pub async fn signals(&self, params: QueryParams) -> Result<Vec<JsonValue>> {
        self.list(Resource::Signals, params).await
    }

    pub async fn signal(&self, id: impl fmt::Display, params: QueryParams) -> Result<JsonValue> {
        self.fetch(Resource::Signals, id, params).await
    }

    /// Remediations of an incident report, all pages
    pub async fn remediations(
        &self,
        incident_report_id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<Vec<JsonValue>> {
        let path = self.api_url(&format!(
            "{}/remediations",
            Resource::IncidentReports.member_path(incident_report_id)
        ));
        self.get_paged(&path, params).await
    }

    /// One remediation of an incident report
    pub async fn remediation(
        &self,
        incident_report_id: impl fmt::Display,
        remediation_id: impl fmt::Display,
        params: QueryParams,
    ) -> Result<JsonValue> {
        let path = self.api_url(&format!(
            "{}/remediations/{remediation_id}",
            Resource::IncidentReports.member_path(incident_report_id)
        ));
        self.get(&path, params).await
    }
}

impl<T: Transport> fmt::Debug for HuntressClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuntressClient")
            .field("endpoint", &self.config.endpoint)
            .field("page_size", &self.config.page_size)
            .field("authenticated", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}

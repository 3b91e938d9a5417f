//! HTTP implementation of [`HydroMeteoApi`].

use async_trait::async_trait;
use hydromet_common::{CurrentGrid, HydroError, HydroResult, TimeSeries};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::api::HydroMeteoApi;
use crate::types::{CurrentsGridRequest, HealthStatus, IceTimeSeriesRequest, TimeSeriesQuery};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client for one backend instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for `base_url`. A trailing `/` is dropped.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn wmts_capabilities_url(&self) -> String {
        format!("{}/wmts/capabilities", self.base_url)
    }

    pub fn wmts_tile_url_template(&self) -> String {
        format!(
            "{}/wmts/tile?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0&Layer={{Layer}}&Style={{Style}}&\
             Format={{Format}}&TileMatrixSet={{TileMatrixSet}}&TileMatrix={{TileMatrix}}&\
             TileRow={{TileRow}}&TileCol={{TileCol}}&Time={{Time}}",
            self.base_url
        )
    }

    /// Fetch the capabilities document as text.
    pub async fn fetch_wmts_capabilities(&self) -> HydroResult<String> {
        let response = self
            .client
            .get(self.wmts_capabilities_url())
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        response.text().await.map_err(transport_error)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> HydroResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> HydroResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }
}

fn transport_error(err: reqwest::Error) -> HydroError {
    HydroError::Transport(err.to_string())
}

async fn check_status(response: Response) -> HydroResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), url = %url, "Backend request failed");
    Err(HydroError::Http {
        status: status.as_u16(),
        body,
    })
}

/// Read the body as text and decode it, whatever the content type says.
async fn decode<T: DeserializeOwned>(response: Response) -> HydroResult<T> {
    let text = response.text().await.map_err(transport_error)?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl HydroMeteoApi for ApiClient {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn health(&self) -> HydroResult<HealthStatus> {
        self.get_json("/health").await
    }

    #[instrument(skip(self, query), fields(dataset = ?query.dataset, variable = %query.variable))]
    async fn timeseries(&self, query: &TimeSeriesQuery) -> HydroResult<TimeSeries> {
        let series: TimeSeries = self.post_json("/api/timeseries", query).await?;
        series.validate()?;
        Ok(series)
    }

    #[instrument(skip(self, request))]
    async fn ice_timeseries(&self, request: &IceTimeSeriesRequest) -> HydroResult<TimeSeries> {
        let series: TimeSeries = self.post_json("/api/ice-timeseries", request).await?;
        series.validate()?;
        Ok(series)
    }

    #[instrument(skip(self, request), fields(step = request.step))]
    async fn currents_grid(&self, request: &CurrentsGridRequest) -> HydroResult<CurrentGrid> {
        self.post_json("/api/currents-grid", request).await
    }

    async fn wmts_capabilities(&self) -> HydroResult<String> {
        self.fetch_wmts_capabilities().await
    }

    fn wmts_tile_url_template(&self) -> String {
        ApiClient::wmts_tile_url_template(self)
    }
}

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::payload::build_payload;
use super::response::{ControlResponse, StateResponse};
use crate::error::AppError;
use crate::models::command::Command;
use crate::models::device::Snapshot;
use crate::models::device_state::DeviceState;

pub const DEFAULT_HOST: &str = "https://developer-api.govee.com";

const PATH_DEVICES: &str = "/v1/devices";
const PATH_DEVICE_STATE: &str = "/v1/devices/state";
const PATH_DEVICE_CONTROL: &str = "/v1/devices/control";

const API_KEY_HEADER: &str = "Govee-API-Key";

pub struct GoveeApi {
    client: reqwest::Client,
    pub host: String,
    api_key: String,
}

fn build_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("goveectl/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()?)
}

impl GoveeApi {
    pub fn new(api_key: &str, host: Option<String>) -> Result<Self, AppError> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        Ok(Self {
            client: build_http_client()?,
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Send a request and decode a successful JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = self.with_headers(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), body = %body, "Received response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        if status != StatusCode::OK {
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Get the list of devices registered to the account.
    pub async fn list_devices(&self) -> Result<Snapshot, AppError> {
        let url = self.url(PATH_DEVICES);
        tracing::debug!(%url, "GET device list");
        self.execute(self.client.get(&url)).await
    }

    pub async fn get_device_state(
        &self,
        device: &str,
        model: &str,
    ) -> Result<DeviceState, AppError> {
        let url = self.url(PATH_DEVICE_STATE);
        tracing::debug!(%url, device, model, "GET device state");

        let response: StateResponse = self
            .execute(
                self.client
                    .get(&url)
                    .query(&[("device", device), ("model", model)]),
            )
            .await?;

        Ok(DeviceState::from_properties(
            &response.data.device,
            &response.data.model,
            &response.data.properties,
        ))
    }

    pub async fn send_control_command(
        &self,
        device: &str,
        model: &str,
        command: &Command,
    ) -> Result<ControlResponse, AppError> {
        let url = self.url(PATH_DEVICE_CONTROL);
        let body = serde_json::to_string(&build_payload(device, model, command))?;
        tracing::debug!(%url, %body, "PUT control command");

        self.execute(self.client.put(&url).body(body)).await
    }
}

//! HTTP implementation of [`ScannerApi`].
//!
//! One pooled `reqwest` client per [`ScannerClient`]. The API key and content
//! type ride along as default headers, so every request is authenticated the
//! same way. Building the client performs no network I/O.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use scanbatch_common::config::ScannerConfig;

use crate::api::ScannerApi;
use crate::error::{Error, Result};
use crate::models::{
    AddTargetRequest, AddTargetResponse, ProfileList, ProxyPayload, Scan, ScanList,
    ScanningProfile, Schedule, StartScanRequest, Target, TargetList, TARGET_CRITICALITY,
    TARGET_DESCRIPTION,
};

/// `X-Auth`, lowercased as header names are stored.
pub const AUTH_HEADER: &str = "x-auth";

const TARGETS_PATH: &str = "/api/v1/targets";
const SCANS_PATH: &str = "/api/v1/scans";
const PROFILES_PATH: &str = "/api/v1/scanning_profiles";

const CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const DELETED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

#[derive(Clone)]
pub struct ScannerClient {
    http: reqwest::Client,
    config: ScannerConfig,
}

impl ScannerClient {
    /// Builds the transport from `config`.
    ///
    /// Fails only on values that cannot be put on the wire: an API key that is
    /// not a valid header value, or an unparseable client proxy URL.
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| Error::Config("api_key contains characters not allowed in a header".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_HEADER), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.insecure_tls);

        builder = match config.client_proxy.as_deref().map(str::trim) {
            Some(proxy) if !proxy.is_empty() => {
                let proxy = reqwest::Proxy::all(proxy)
                    .map_err(|e| Error::Config(format!("invalid client proxy '{proxy}': {e}")))?;
                builder.proxy(proxy)
            }
            // Only the configured proxy is used, never one from the environment.
            _ => builder.no_proxy(),
        };

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!(%method, %url, "scanner request");
        self.http.request(method, url)
    }

    /// Sends the request and returns the body when the status is accepted.
    async fn send(&self, request: RequestBuilder, accepted: &[StatusCode]) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !accepted.contains(&status) {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode(body)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> Result<String> {
        let request = self.request(Method::POST, path).json(payload);
        self.send(request, CREATED).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path), DELETED).await?;
        Ok(())
    }
}

#[async_trait]
impl ScannerApi for ScannerClient {
    async fn add_target(&self, url: &str) -> Result<String> {
        let payload = AddTargetRequest {
            address: url,
            description: TARGET_DESCRIPTION,
            criticality: TARGET_CRITICALITY,
        };
        let body = self.post(TARGETS_PATH, &payload).await?;
        let created: AddTargetResponse = decode(body)?;

        created
            .target_id
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingField("target_id"))
    }

    async fn start_scan(&self, target_id: &str, profile_id: &str) -> Result<()> {
        let proxy = self.config.scan_proxy();
        let payload = StartScanRequest {
            target_id,
            profile_id,
            schedule: Schedule::default(),
            scan_speed: self.config.scan_speed.as_str(),
            user_authorized_to_scan: "yes",
            proxy: proxy.as_ref().map(|p| ProxyPayload {
                address: &p.address,
                port: p.port,
            }),
        };
        self.post(SCANS_PATH, &payload).await?;
        Ok(())
    }

    async fn get_targets(&self) -> Result<Vec<Target>> {
        let list: TargetList = self.get_json(TARGETS_PATH).await?;
        Ok(list.targets)
    }

    async fn get_scans(&self) -> Result<Vec<Scan>> {
        let list: ScanList = self.get_json(SCANS_PATH).await?;
        Ok(list.scans)
    }

    async fn get_scanning_profiles(&self) -> Result<Vec<ScanningProfile>> {
        let list: ProfileList = self.get_json(PROFILES_PATH).await?;
        Ok(list.scanning_profiles)
    }

    async fn delete_target(&self, target_id: &str) -> Result<()> {
        self.delete(&format!("{TARGETS_PATH}/{target_id}")).await
    }

    async fn delete_scan(&self, scan_id: &str) -> Result<()> {
        self.delete(&format!("{SCANS_PATH}/{scan_id}")).await
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T> {
    serde_json::from_str(&body).map_err(|source| Error::Decode { source, body })
}

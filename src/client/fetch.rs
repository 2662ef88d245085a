use futures_util::future::try_join;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::listing::{CITIES_PATH, HOTELS_PATH};
use crate::models::{City, Envelope, Hotel};

/// 客户端加载错误
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("请求 {endpoint} 失败 / request failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} 响应无法解析 / invalid response: {message}")]
    Decode { endpoint: String, message: String },
    #[error("{endpoint} 返回错误 / server error: {message}")]
    Server { endpoint: String, message: String },
}

impl ClientError {
    /// 面向用户的单条错误提示
    pub fn banner(&self) -> String {
        format!("加载数据失败 / Failed to load data: {}", self)
    }
}

/// 一次加载得到的两份快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    pub cities: Vec<City>,
    pub hotels: Vec<Hotel>,
}

/// 列表接口客户端
pub struct ListingClient {
    base_url: String,
    http: reqwest::Client,
}

impl ListingClient {
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client<T: Into<String>>(base_url: T, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_listing<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let url = self.endpoint(path);
        let network = |source| ClientError::Network {
            endpoint: path.to_string(),
            source,
        };

        let resp = self.http.get(&url).send().await.map_err(network)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(network)?;
        debug!(url = %url, status, bytes = body.len(), "listing response");

        parse_envelope(path, status, &body)
    }

    pub async fn fetch_cities(&self) -> Result<Vec<City>, ClientError> {
        self.fetch_listing(CITIES_PATH).await
    }

    pub async fn fetch_hotels(&self) -> Result<Vec<Hotel>, ClientError> {
        self.fetch_listing(HOTELS_PATH).await
    }

    /// 并发加载两份列表，全部成功才返回
    /// Fetch both listings concurrently; either failure fails the whole load
    pub async fn load(&self) -> Result<Snapshots, ClientError> {
        let (cities, hotels) = try_join(self.fetch_cities(), self.fetch_hotels()).await?;
        info!(
            cities = cities.len(),
            hotels = hotels.len(),
            "快照加载完成 / snapshots loaded"
        );
        Ok(Snapshots { cities, hotels })
    }
}

/// 解析响应信封；非成功信封转换为 `ClientError::Server`
pub fn parse_envelope<T: DeserializeOwned>(
    endpoint: &str,
    status: u16,
    body: &[u8],
) -> Result<Vec<T>, ClientError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ClientError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("HTTP {}: {}", status, e),
        })?;
    envelope.into_data().map_err(|message| ClientError::Server {
        endpoint: endpoint.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_envelope() {
        let body = br#"{"success":true,"data":[{"id":2,"name":"Lyon"}],"count":1}"#;
        let cities: Vec<City> = parse_envelope(CITIES_PATH, 200, body).unwrap();
        assert_eq!(cities, vec![City::new(2, "Lyon")]);
    }

    #[test]
    fn test_parse_failure_envelope() {
        let body = br#"{"success":false,"data":[],"count":0,"error":"connection refused"}"#;
        let err = parse_envelope::<City>(CITIES_PATH, 500, body).unwrap_err();
        match err {
            ClientError::Server { endpoint, message } => {
                assert_eq!(endpoint, CITIES_PATH);
                assert_eq!(message, "connection refused");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_json_body() {
        let err = parse_envelope::<Hotel>(HOTELS_PATH, 404, b"Not Found").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert!(err.to_string().contains("HTTP 404"));
        assert!(err.banner().contains("Failed to load data"));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ListingClient::new("http://localhost:8080/");
        assert_eq!(client.endpoint(CITIES_PATH), "http://localhost:8080/api/cities");
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_whole_load() {
        let client = ListingClient::new("http://127.0.0.1:1");
        let err = client.load().await.unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
    }
}

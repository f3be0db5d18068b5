// HTTP 数据源 - 对接未来的真实记录后端

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::DataService;
use crate::models::CaptureRecord;

/// HTTP 后端数据源
///
/// 约定接口: `GET {base_url}/api/records` 返回 CaptureRecord 的 JSON 数组。
/// 复用全局共享的 reqwest 客户端以复用连接池
pub struct HttpDataService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataService {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn records_url(&self) -> String {
        format!("{}/api/records", self.base_url)
    }
}

#[async_trait]
impl DataService for HttpDataService {
    async fn fetch_records(&self) -> Result<Vec<CaptureRecord>> {
        let url = self.records_url();
        debug!("请求记录接口: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("请求记录接口失败")?;

        if !response.status().is_success() {
            bail!("记录接口返回错误状态: {}", response.status());
        }

        let records = response
            .json::<Vec<CaptureRecord>>()
            .await
            .context("解析记录响应失败")?;

        Ok(records)
    }

    fn source_kind(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_url_strips_trailing_slash() {
        let service = HttpDataService::new(reqwest::Client::new(), "http://localhost:8080/".to_string());
        assert_eq!(service.records_url(), "http://localhost:8080/api/records");
    }
}

// 数据服务模块 - 记录数据源抽象与内存快照

// 子模块
pub mod config;
pub mod http;
pub mod mock;
pub mod store;

// 重新导出主要类型
pub use config::DataSourceConfig;
pub use http::HttpDataService;
pub use mock::MockDataService;
pub use store::{RecordStore, RefreshOutcome};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::CaptureRecord;

/// 记录数据服务接口 - 所有数据源实现必须实现此 trait
///
/// 当前只有内存模拟实现, 未来接入真实后端时通过配置切换到 HTTP 实现,
/// 上层代码不感知数据源差异
#[async_trait]
pub trait DataService: Send + Sync {
    /// 拉取全部拍摄记录
    async fn fetch_records(&self) -> Result<Vec<CaptureRecord>>;

    /// 数据源类型标识
    fn source_kind(&self) -> &str;
}

/// 根据配置创建数据服务实例
pub fn create_service(
    config: &DataSourceConfig,
    http_client: reqwest::Client,
) -> Arc<dyn DataService> {
    match config {
        DataSourceConfig::Mock {
            delay_ms,
            generated_records,
        } => Arc::new(MockDataService::new(*delay_ms, *generated_records)),
        DataSourceConfig::Http { base_url } => {
            Arc::new(HttpDataService::new(http_client, base_url.clone()))
        }
    }
}

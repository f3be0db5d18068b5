// 数据源配置定义

use serde::{Deserialize, Serialize};

fn default_delay_ms() -> u64 {
    500
}

fn default_generated_records() -> usize {
    15
}

/// 数据源配置类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DataSourceConfig {
    /// 内存模拟数据源 (开发/演示)
    #[serde(rename = "mock")]
    Mock {
        /// 模拟后端延迟(毫秒)
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
        /// 固定种子记录之外随机生成的记录条数
        #[serde(default = "default_generated_records")]
        generated_records: usize,
    },
    /// HTTP 后端数据源
    #[serde(rename = "http")]
    Http {
        /// 服务地址, 如 http://localhost:8080
        base_url: String,
    },
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        DataSourceConfig::Mock {
            delay_ms: default_delay_ms(),
            generated_records: default_generated_records(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_tagged_serialization() {
        let config = DataSourceConfig::Http {
            base_url: "http://localhost:8080".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"http\""));

        let parsed: DataSourceConfig = serde_json::from_str("{\"type\":\"mock\"}").unwrap();
        match parsed {
            DataSourceConfig::Mock {
                delay_ms,
                generated_records,
            } => {
                assert_eq!(delay_ms, 500);
                assert_eq!(generated_records, 15);
            }
            _ => panic!("应解析为 mock 配置"),
        }
    }
}

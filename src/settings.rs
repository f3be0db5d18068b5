// 应用配置管理 - JSON 文件持久化, 支持增量更新

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::AppError;
use crate::models::{AppConfigPatch, PersistedAppConfig};

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedAppConfig>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<PersistedAppConfig>(&bytes).unwrap_or_default()
            }
            _ => {
                let default = PersistedAppConfig::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedAppConfig {
        self.data.read().await.clone()
    }

    /// 应用增量更新并持久化, 返回更新后的完整配置
    pub async fn update(&self, patch: AppConfigPatch) -> Result<PersistedAppConfig, AppError> {
        if let Some(interval) = patch.refresh_interval_secs {
            if interval == 0 {
                return Err(AppError::validation("刷新间隔必须大于 0"));
            }
        }
        if let Some(page_size) = patch.page_size {
            if page_size == 0 {
                return Err(AppError::validation("分页大小必须大于 0"));
            }
        }

        let mut config = self.data.write().await;

        if let Some(interval) = patch.refresh_interval_secs {
            config.refresh_interval_secs = interval;
        }
        if let Some(page_size) = patch.page_size {
            config.page_size = page_size;
        }
        if let Some(data_source) = patch.data_source {
            // 数据源在启动时装配, 修改在应用重启后生效
            info!("数据源配置已更新, 重启应用后生效");
            config.data_source = data_source;
        }
        if let Some(ui) = patch.ui_settings {
            config.ui_settings = Some(ui);
        }

        self.save(&config).await.map_err(AppError::source_unavailable)?;
        Ok(config.clone())
    }

    async fn save(&self, config: &PersistedAppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataSourceConfig;

    #[tokio::test]
    async fn test_defaults_written_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        let config = manager.get().await;
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.page_size, 6);
        assert!(matches!(config.data_source, DataSourceConfig::Mock { .. }));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_partial_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        let updated = manager
            .update(AppConfigPatch {
                page_size: Some(12),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.page_size, 12);
        // 未提供的字段保持原值
        assert_eq!(updated.refresh_interval_secs, 30);

        let reloaded = SettingsManager::new(path).await.unwrap();
        assert_eq!(reloaded.get().await.page_size, 12);
    }

    #[tokio::test]
    async fn test_update_rejects_zero_values() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::new(dir.path().join("config.json"))
            .await
            .unwrap();

        let err = manager
            .update(AppConfigPatch {
                refresh_interval_secs: Some(0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(manager.get().await.refresh_interval_secs, 30);
    }
}

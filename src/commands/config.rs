//! 配置管理命令
//!
//! 提供应用配置的读取与增量更新接口

use tracing::info;

use crate::event_bus::AppEvent;
use crate::models::{AppConfigPatch, PersistedAppConfig};
use crate::AppState;

/// 获取当前应用配置
#[tauri::command]
pub async fn get_app_config(
    state: tauri::State<'_, AppState>,
) -> Result<PersistedAppConfig, String> {
    Ok(state.data_domain.get_settings().get().await)
}

/// 增量更新应用配置
///
/// 只更新提供的字段, 数据源变更在应用重启后生效
#[tauri::command]
pub async fn update_app_config(
    state: tauri::State<'_, AppState>,
    patch: AppConfigPatch,
) -> Result<PersistedAppConfig, String> {
    let updated = state
        .data_domain
        .get_settings()
        .update(patch)
        .await
        .map_err(|e| e.to_string())?;

    info!("应用配置已更新");
    state.event_bus.publish(AppEvent::ConfigUpdated);
    Ok(updated)
}

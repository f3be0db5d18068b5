//! 系统控制命令
//!
//! 提供数据刷新与系统状态接口

use tracing::info;

use crate::event_bus::AppEvent;
use crate::models::SystemStatus;
use crate::service::RefreshOutcome;
use crate::AppState;

/// 立即刷新记录快照
///
/// 若已有刷新在途则跳过本次请求, 返回当前快照大小。
/// 刷新失败时保留旧快照并返回错误
#[tauri::command]
pub async fn refresh_records(state: tauri::State<'_, AppState>) -> Result<usize, String> {
    let store = state.data_domain.get_store();
    match store.refresh().await.map_err(|e| e.to_string())? {
        RefreshOutcome::Refreshed { total } => {
            info!("手动刷新完成, 共 {} 条记录", total);
            state
                .event_bus
                .publish(AppEvent::RecordsRefreshed { total });
            Ok(total)
        }
        RefreshOutcome::Skipped => Ok(store.snapshot().await.len()),
    }
}

/// 获取系统运行状态
#[tauri::command]
pub async fn get_system_status(state: tauri::State<'_, AppState>) -> Result<SystemStatus, String> {
    let store = state.data_domain.get_store();
    let config = state.data_domain.get_settings().get().await;

    Ok(SystemStatus {
        total_records: store.snapshot().await.len(),
        last_refresh: store.last_refresh().await,
        source_kind: store.source_kind().to_string(),
        refresh_interval_secs: config.refresh_interval_secs,
    })
}

/// 设置日志实时推送开关
#[tauri::command]
pub async fn set_log_stream_enabled(
    state: tauri::State<'_, AppState>,
    enabled: bool,
) -> Result<(), String> {
    state.system_domain.get_logger().set_enabled(enabled);
    info!("日志推送已{}", if enabled { "开启" } else { "关闭" });
    Ok(())
}

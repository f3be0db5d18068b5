//! 工作人员身份命令
//!
//! 提供当前身份查询、登录、登出与演示用自动填充接口

use crate::event_bus::AppEvent;
use crate::identity;
use crate::models::{WorkerIdentity, WorkerProfile};
use crate::AppState;

/// 获取当前登录的工作人员, 未登录返回 None
#[tauri::command]
pub async fn get_current_worker(
    state: tauri::State<'_, AppState>,
) -> Result<Option<WorkerIdentity>, String> {
    Ok(state.identity_domain.get_manager().current().await)
}

/// 工作人员登录
///
/// 工号两端空白会被去除, 为空则拒绝
#[tauri::command]
pub async fn sign_in_worker(
    state: tauri::State<'_, AppState>,
    worker_id: String,
    display_name: Option<String>,
) -> Result<WorkerIdentity, String> {
    let identity = state
        .identity_domain
        .get_manager()
        .sign_in(&worker_id, display_name.as_deref())
        .await
        .map_err(|e| e.to_string())?;

    state.event_bus.publish(AppEvent::WorkerSignedIn {
        worker_id: identity.id.clone(),
    });
    Ok(identity)
}

/// 工作人员登出
#[tauri::command]
pub async fn sign_out_worker(state: tauri::State<'_, AppState>) -> Result<(), String> {
    state
        .identity_domain
        .get_manager()
        .sign_out()
        .await
        .map_err(|e| e.to_string())?;

    state.event_bus.publish(AppEvent::WorkerSignedOut);
    Ok(())
}

/// 随机取一份示例档案, 用于登录表单的演示自动填充
#[tauri::command]
pub async fn suggest_worker_credentials() -> Result<WorkerProfile, String> {
    Ok(identity::suggest_credentials())
}

/// 随机生成一个 W+4位数字 格式的工号
#[tauri::command]
pub async fn generate_worker_id() -> Result<String, String> {
    Ok(identity::generate_worker_id())
}

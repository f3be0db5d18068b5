//! CSV 导出命令
//!
//! 提供全量导出、过滤导出与落盘保存接口

use tauri::Manager;

use crate::event_bus::AppEvent;
use crate::export::{self, CsvExport, ALL_DATA_PREFIX, FILTERED_DATA_PREFIX};
use crate::models::FilterCriteria;
use crate::{query, AppState};

use super::query::validate_criteria_dates;

/// 导出全部记录为 CSV
#[tauri::command]
pub async fn export_all_csv(state: tauri::State<'_, AppState>) -> Result<CsvExport, String> {
    let snapshot = state.data_domain.get_store().snapshot().await;
    let export = export::build_export(
        &snapshot,
        ALL_DATA_PREFIX,
        chrono::Local::now().date_naive(),
    );

    state.event_bus.publish(AppEvent::ExportCompleted {
        filename: export.filename.clone(),
        rows: export.rows,
    });
    Ok(export)
}

/// 导出过滤结果为 CSV
///
/// 空的过滤结果返回仅含表头的内容, 不视为错误
#[tauri::command]
pub async fn export_filtered_csv(
    state: tauri::State<'_, AppState>,
    criteria: Option<FilterCriteria>,
) -> Result<CsvExport, String> {
    let criteria = criteria.unwrap_or_default();
    validate_criteria_dates(&criteria)?;

    let snapshot = state.data_domain.get_store().snapshot().await;
    let filtered = query::filter(&snapshot, &criteria);
    let export = export::build_export(
        &filtered,
        FILTERED_DATA_PREFIX,
        chrono::Local::now().date_naive(),
    );

    state.event_bus.publish(AppEvent::ExportCompleted {
        filename: export.filename.clone(),
        rows: export.rows,
    });
    Ok(export)
}

/// 将导出内容写入应用数据目录下的 exports 子目录
///
/// # 返回
/// - 写入文件的完整路径
#[tauri::command]
pub async fn save_csv_export(
    app: tauri::AppHandle,
    export: CsvExport,
) -> Result<String, String> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| format!("无法获取应用数据目录: {}", e))?
        .join("exports");

    let path = export::save_csv(&dir, &export)
        .await
        .map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

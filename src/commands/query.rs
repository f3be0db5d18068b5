//! 数据查询命令
//!
//! 提供各类数据查询接口，包括：
//! - 仪表盘汇总查询
//! - 记录分页查询
//! - 筛选候选项查询
//! - 工作人员活跃度查询

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{
    CaptureRecord, DashboardSummary, FilterCriteria, WorkerActivity,
};
use crate::query::{FilterOptions, RecordPage};
use crate::{query, stats, AppState};

// ==================== 输入验证辅助函数 ====================

fn date_regex() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("日期正则为合法表达式"))
}

/// 验证记录ID是否有效（防止无效输入）
fn validate_record_id(id: i64) -> Result<(), String> {
    if id < 0 {
        return Err(format!("无效的记录 ID: {}", id));
    }
    Ok(())
}

/// 验证过滤条件中的日期参数格式 (YYYY-MM-DD)
pub(crate) fn validate_criteria_dates(criteria: &FilterCriteria) -> Result<(), String> {
    for date in [&criteria.start_date, &criteria.end_date].into_iter().flatten() {
        if !date_regex().is_match(date) {
            return Err(format!("无效的日期格式: {}, 应为 YYYY-MM-DD", date));
        }
    }
    Ok(())
}

// ==================== Tauri命令 ====================

/// 获取仪表盘汇总数据
///
/// "今日" 以本机当前日期为准, 汇总基于当前内存快照
#[tauri::command]
pub async fn get_dashboard_summary(
    state: tauri::State<'_, AppState>,
) -> Result<DashboardSummary, String> {
    let snapshot = state.data_domain.get_store().snapshot().await;
    let today = chrono::Local::now().date_naive();
    Ok(stats::summarize(&snapshot, today))
}

/// 获取过滤并分页后的记录列表
///
/// # 参数
/// - `criteria`: 过滤条件, 省略表示不过滤
/// - `page`: 页码 (从 1 开始), 越界会被收敛
#[tauri::command]
pub async fn get_records_page(
    state: tauri::State<'_, AppState>,
    criteria: Option<FilterCriteria>,
    page: Option<usize>,
) -> Result<RecordPage, String> {
    let criteria = criteria.unwrap_or_default();
    validate_criteria_dates(&criteria)?;

    let snapshot = state.data_domain.get_store().snapshot().await;
    let filtered = query::filter(&snapshot, &criteria);
    let page_size = state.data_domain.get_settings().get().await.page_size;
    Ok(query::paginate(&filtered, page_size, page.unwrap_or(1)))
}

/// 获取筛选控件的候选项（模型与工号, 升序去重）
#[tauri::command]
pub async fn get_filter_options(
    state: tauri::State<'_, AppState>,
) -> Result<FilterOptions, String> {
    let snapshot = state.data_domain.get_store().snapshot().await;
    Ok(query::filter_options(&snapshot))
}

/// 获取各工作人员的活跃度统计
#[tauri::command]
pub async fn get_worker_activity(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<WorkerActivity>, String> {
    let snapshot = state.data_domain.get_store().snapshot().await;
    Ok(stats::worker_activity(&snapshot))
}

/// 按 ID 查询单条记录
#[tauri::command]
pub async fn get_record(
    state: tauri::State<'_, AppState>,
    record_id: i64,
) -> Result<Option<CaptureRecord>, String> {
    validate_record_id(record_id)?;
    let snapshot = state.data_domain.get_store().snapshot().await;
    Ok(snapshot.iter().find(|r| r.id == record_id).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_criteria_dates() {
        let good = FilterCriteria {
            start_date: Some("2025-07-06".to_string()),
            end_date: Some("2025-07-07".to_string()),
            ..Default::default()
        };
        assert!(validate_criteria_dates(&good).is_ok());

        let bad = FilterCriteria {
            start_date: Some("07/06/2025".to_string()),
            ..Default::default()
        };
        assert!(validate_criteria_dates(&bad).is_err());

        assert!(validate_criteria_dates(&FilterCriteria::default()).is_ok());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id(0).is_ok());
        assert!(validate_record_id(42).is_ok());
        assert!(validate_record_id(-1).is_err());
    }
}

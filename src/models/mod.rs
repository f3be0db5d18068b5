// 数据模型模块 - 定义所有的数据结构

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

// 重新导出其他模块的类型
pub use crate::service::config::DataSourceConfig;

/// 拍摄记录的日期字符串格式 (按字典序可排序)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 将毫秒时间戳格式化为本地时间的日期字符串 (YYYY-MM-DD HH:MM)
///
/// 记录的 `timestamp` 与 `date` 必须保持一致, 所有日期字符串都经由此函数派生
pub fn date_string(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// 获取当前本地时间的毫秒时间戳
pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// 记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// 计数成功
    Success,
    /// 模型处理失败
    Error,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Success => "success",
            RecordStatus::Error => "error",
        }
    }
}

/// 图片附加信息 (各字段彼此独立可缺省)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// 文件大小(字节)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// 分辨率 (如 "1920x1080")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// 拍摄工位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// 拍摄记录 - 一张已分析照片及其计数结果
///
/// 记录创建后不可变, 刷新时整批替换快照而不是原地修改。
/// 不变量: `status=success` 时 `count` 有效且无 `error_reason`;
/// `status=error` 时 `error_reason` 存在且 `count` 无意义(置 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    /// 唯一标识
    pub id: i64,
    /// 日期字符串, 由 `timestamp` 派生
    pub date: String,
    /// 毫秒时间戳
    pub timestamp: i64,
    /// 产生结果的计数模型名称
    pub model: String,
    /// 计数结果 (仅 success 时有意义)
    pub count: u32,
    /// 提交记录的工作人员工号
    pub worker_id: String,
    /// 处理状态
    pub status: RecordStatus,
    /// 失败原因 (仅 error 时存在)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    /// 模型置信度 [0,1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    /// 附加信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl CaptureRecord {
    /// 构造一条成功记录, 日期字符串由时间戳派生
    #[allow(clippy::too_many_arguments)]
    pub fn success(
        id: i64,
        timestamp_ms: i64,
        model: impl Into<String>,
        count: u32,
        worker_id: impl Into<String>,
        confidence_score: Option<f64>,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        Self {
            id,
            date: date_string(timestamp_ms),
            timestamp: timestamp_ms,
            model: model.into(),
            count,
            worker_id: worker_id.into(),
            status: RecordStatus::Success,
            error_reason: None,
            confidence_score,
            metadata,
        }
    }

    /// 构造一条失败记录, 计数置 0 并携带失败原因
    pub fn failure(
        id: i64,
        timestamp_ms: i64,
        model: impl Into<String>,
        worker_id: impl Into<String>,
        error_reason: impl Into<String>,
        confidence_score: Option<f64>,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        Self {
            id,
            date: date_string(timestamp_ms),
            timestamp: timestamp_ms,
            model: model.into(),
            count: 0,
            worker_id: worker_id.into(),
            status: RecordStatus::Error,
            error_reason: Some(error_reason.into()),
            confidence_score,
            metadata,
        }
    }
}

/// 模型使用统计 (派生数据, 不存储)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsageStat {
    /// 模型名称
    pub model: String,
    /// 该模型成功记录数
    pub count: usize,
    /// 最近一次使用的日期字符串 (按时间戳比较得出)
    pub last_used: String,
}

/// 看板汇总统计
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// 今日记录数
    pub daily_count: usize,
    /// 总记录数
    pub total_count: usize,
    /// 错误率(百分比, 空数据集为 0)
    pub error_rate: f64,
    /// 各模型使用统计, 按次数降序
    pub model_usage_stats: Vec<ModelUsageStat>,
}

/// 工作人员活跃统计 (派生数据)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerActivity {
    /// 工号
    pub worker_id: String,
    /// 提交的记录总数
    pub total_records: usize,
    /// 最近活跃时间的日期字符串
    pub last_active: String,
}

/// 查询过滤条件 - 所有条件为 AND 关系, 未设置的条件匹配全部
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// 模型名称(精确匹配)
    pub model: Option<String>,
    /// 工号(精确匹配)
    pub worker_id: Option<String>,
    /// 状态
    pub status: Option<RecordStatus>,
    /// 起始日期 (YYYY-MM-DD, 含当天)
    pub start_date: Option<String>,
    /// 结束日期 (YYYY-MM-DD, 含当天)
    pub end_date: Option<String>,
}

impl FilterCriteria {
    /// 是否未设置任何条件
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.worker_id.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// 当前登录的工作人员身份
///
/// 仅用于在记录上附带提交人, 不构成任何访问控制边界
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerIdentity {
    /// 工号
    pub id: String,
    /// 显示名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// 示例工作人员档案 (演示自动填充用)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub id: String,
    pub name: String,
    pub department: String,
    pub shift: String,
}

/// 系统状态 (供前端状态栏展示)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// 当前快照中的记录总数
    pub total_records: usize,
    /// 最后一次成功刷新的时间
    pub last_refresh: Option<String>,
    /// 数据源类型标识
    pub source_kind: String,
    /// 刷新间隔(秒)
    pub refresh_interval_secs: u64,
}

/// UI设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    /// 主题(light/dark)
    pub theme: String,
    /// 语言
    pub language: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// 持久化的应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAppConfig {
    /// 看板自动刷新间隔(秒)
    pub refresh_interval_secs: u64,
    /// 图库分页大小
    pub page_size: usize,
    /// 记录数据源配置
    pub data_source: DataSourceConfig,
    /// UI设置
    pub ui_settings: Option<UiSettings>,
}

impl Default for PersistedAppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            page_size: crate::query::DEFAULT_PAGE_SIZE,
            data_source: DataSourceConfig::default(),
            ui_settings: Some(UiSettings::default()),
        }
    }
}

/// 应用配置的增量更新 (未提供的字段保持原值)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfigPatch {
    /// 刷新间隔(秒)
    pub refresh_interval_secs: Option<u64>,
    /// 分页大小
    pub page_size: Option<usize>,
    /// 数据源配置
    pub data_source: Option<DataSourceConfig>,
    /// UI设置
    pub ui_settings: Option<UiSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_constructors_keep_invariant() {
        let ok = CaptureRecord::success(1, now_ms(), "Round Type", 24, "12345", Some(0.95), None);
        assert_eq!(ok.status, RecordStatus::Success);
        assert!(ok.error_reason.is_none());
        assert_eq!(ok.date, date_string(ok.timestamp));

        let bad = CaptureRecord::failure(2, now_ms(), "Plate Type", "23456", "Image is blurry", Some(0.23), None);
        assert_eq!(bad.status, RecordStatus::Error);
        assert_eq!(bad.count, 0);
        assert_eq!(bad.error_reason.as_deref(), Some("Image is blurry"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&RecordStatus::Success).unwrap();
        assert_eq!(json, "\"success\"");
        let status: RecordStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, RecordStatus::Error);
    }

    #[test]
    fn test_filter_criteria_default_is_empty() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        let criteria: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert!(criteria.is_empty());
    }
}

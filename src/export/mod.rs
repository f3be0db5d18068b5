// 导出领域 - 将记录序列化为 CSV 并落盘

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::CaptureRecord;

/// 导出全部数据时的文件名前缀
pub const ALL_DATA_PREFIX: &str = "countai_all_data";
/// 导出过滤结果时的文件名前缀
pub const FILTERED_DATA_PREFIX: &str = "countai_filtered_data";

/// CSV 列头, 顺序固定
const CSV_HEADERS: [&str; 12] = [
    "Photo ID",
    "Worker ID",
    "Timestamp",
    "Date Time",
    "Model Used",
    "Count Result",
    "Confidence Score",
    "Status",
    "Error Reason",
    "File Size (bytes)",
    "Resolution",
    "Location",
];

/// 一次生成好的 CSV 导出内容
///
/// 实际保存动作(浏览器下载/写文件)由调用方决定, 这里只负责序列化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    /// 建议的文件名, 如 countai_filtered_data_2025-07-07.csv
    pub filename: String,
    /// CSV 文本内容
    pub content: String,
    /// 数据行数(不含表头)
    pub rows: usize,
}

/// 将记录序列化为 CSV 文本
///
/// 空序列返回仅含表头的一行。缺省的可选字段输出空字符串, 不输出
/// "null" 之类的占位词。字段值中的逗号不做转义, 与现网导出格式保持一致
pub fn to_csv(records: &[CaptureRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for record in records {
        lines.push(record_row(record));
    }

    lines.join("\n")
}

fn record_row(record: &CaptureRecord) -> String {
    let metadata = record.metadata.as_ref();
    [
        record.id.to_string(),
        record.worker_id.clone(),
        record.timestamp.to_string(),
        record.date.clone(),
        record.model.clone(),
        record.count.to_string(),
        record
            .confidence_score
            .map(|score| format!("{:.2}", score))
            .unwrap_or_else(|| "0.00".to_string()),
        record.status.as_str().to_string(),
        record.error_reason.clone().unwrap_or_default(),
        metadata
            .and_then(|m| m.file_size)
            .map(|size| size.to_string())
            .unwrap_or_default(),
        metadata
            .and_then(|m| m.resolution.clone())
            .unwrap_or_default(),
        metadata
            .and_then(|m| m.location.clone())
            .unwrap_or_default(),
    ]
    .join(",")
}

/// 生成带日期后缀的导出文件名
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

/// 从记录构造完整的导出对象
pub fn build_export(records: &[CaptureRecord], prefix: &str, date: NaiveDate) -> CsvExport {
    CsvExport {
        filename: export_filename(prefix, date),
        content: to_csv(records),
        rows: records.len(),
    }
}

/// 将导出内容写入目录, 返回完整路径
pub async fn save_csv(dir: &Path, export: &CsvExport) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .context("创建导出目录失败")?;

    let path = dir.join(&export.filename);
    tokio::fs::write(&path, &export.content)
        .await
        .with_context(|| format!("写入导出文件失败: {:?}", path))?;

    info!("CSV 导出已保存: {:?} ({} 行)", path, export.rows);
    Ok(path)
}

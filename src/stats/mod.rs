// 统计领域 - 从记录快照派生看板汇总与活跃统计
//
// 所有函数均为纯函数: "今天"由调用方注入, 函数内部不读取系统时钟,
// 便于测试与结果复现

use chrono::NaiveDate;

use crate::models::{CaptureRecord, DashboardSummary, ModelUsageStat, RecordStatus, WorkerActivity};

/// 计算看板汇总统计
///
/// - 今日记录数: 日期字符串落在 `today` 当天的记录
/// - 错误率: 错误记录占比(百分比), 空数据集为 0
/// - 模型使用: 仅统计成功记录, 按使用次数降序, 并列保持首次出现顺序
pub fn summarize(records: &[CaptureRecord], today: NaiveDate) -> DashboardSummary {
    let today_prefix = today.format("%Y-%m-%d").to_string();

    let daily_count = records
        .iter()
        .filter(|r| r.date.starts_with(&today_prefix))
        .count();

    let error_count = records
        .iter()
        .filter(|r| r.status == RecordStatus::Error)
        .count();

    // 避免除零: 空数据集错误率定义为 0
    let error_rate = if records.is_empty() {
        0.0
    } else {
        error_count as f64 * 100.0 / records.len() as f64
    };

    DashboardSummary {
        daily_count,
        total_count: records.len(),
        error_rate,
        model_usage_stats: model_usage(records),
    }
}

/// 按模型聚合成功记录
///
/// `last_used` 取组内 `timestamp` 最大的记录的日期字符串,
/// 时间戳相同则保留先出现的那条
fn model_usage(records: &[CaptureRecord]) -> Vec<ModelUsageStat> {
    // 用 Vec 而不是 HashMap 聚合, 保留首次出现顺序作为并列时的次序
    let mut usage: Vec<(String, usize, i64, String)> = Vec::new();

    for record in records.iter().filter(|r| r.status == RecordStatus::Success) {
        if let Some(entry) = usage.iter_mut().find(|(model, ..)| *model == record.model) {
            entry.1 += 1;
            if record.timestamp > entry.2 {
                entry.2 = record.timestamp;
                entry.3 = record.date.clone();
            }
        } else {
            usage.push((
                record.model.clone(),
                1,
                record.timestamp,
                record.date.clone(),
            ));
        }
    }

    let mut stats: Vec<ModelUsageStat> = usage
        .into_iter()
        .map(|(model, count, _, last_used)| ModelUsageStat {
            model,
            count,
            last_used,
        })
        .collect();

    // sort_by 是稳定排序, 次数相同的模型保持首次出现顺序
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// 按工号聚合活跃统计, 按最近活跃时间降序
pub fn worker_activity(records: &[CaptureRecord]) -> Vec<WorkerActivity> {
    let mut workers: Vec<(String, usize, i64, String)> = Vec::new();

    for record in records {
        if let Some(entry) = workers
            .iter_mut()
            .find(|(worker, ..)| *worker == record.worker_id)
        {
            entry.1 += 1;
            if record.timestamp > entry.2 {
                entry.2 = record.timestamp;
                entry.3 = record.date.clone();
            }
        } else {
            workers.push((
                record.worker_id.clone(),
                1,
                record.timestamp,
                record.date.clone(),
            ));
        }
    }

    workers.sort_by(|a, b| b.2.cmp(&a.2));
    workers
        .into_iter()
        .map(|(worker_id, total_records, _, last_active)| WorkerActivity {
            worker_id,
            total_records,
            last_active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: i64,
        date: &str,
        timestamp: i64,
        model: &str,
        count: u32,
        worker: &str,
        status: RecordStatus,
    ) -> CaptureRecord {
        CaptureRecord {
            id,
            date: date.to_string(),
            timestamp,
            model: model.to_string(),
            count,
            worker_id: worker.to_string(),
            status,
            error_reason: match status {
                RecordStatus::Error => Some("Processing failed".to_string()),
                RecordStatus::Success => None,
            },
            confidence_score: None,
            metadata: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()
    }

    #[test]
    fn test_summarize_empty_is_all_zero() {
        let summary = summarize(&[], today());
        assert_eq!(summary.daily_count, 0);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.error_rate, 0.0);
        assert!(summary.model_usage_stats.is_empty());
    }

    #[test]
    fn test_summarize_reference_scenario() {
        // 1 条错误 + 2 条同模型成功
        let records = vec![
            record(1, "2025-07-07 10:00", 100, "A", 0, "w1", RecordStatus::Error),
            record(2, "2025-07-07 11:00", 200, "A", 24, "w1", RecordStatus::Success),
            record(3, "2025-07-07 12:00", 300, "A", 10, "w2", RecordStatus::Success),
        ];
        let summary = summarize(&records, today());

        assert!((summary.error_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.daily_count, 3);
        assert_eq!(summary.model_usage_stats.len(), 1);
        assert_eq!(summary.model_usage_stats[0].model, "A");
        assert_eq!(summary.model_usage_stats[0].count, 2);
        // lastUsed 取时间戳最大的记录
        assert_eq!(summary.model_usage_stats[0].last_used, "2025-07-07 12:00");
    }

    #[test]
    fn test_error_rate_within_bounds_and_counts_sum() {
        let records = vec![
            record(1, "2025-07-06 10:00", 100, "A", 5, "w1", RecordStatus::Success),
            record(2, "2025-07-06 11:00", 200, "B", 7, "w1", RecordStatus::Success),
            record(3, "2025-07-06 12:00", 300, "B", 0, "w2", RecordStatus::Error),
            record(4, "2025-07-07 09:00", 400, "B", 3, "w2", RecordStatus::Success),
        ];
        let summary = summarize(&records, today());

        assert!((0.0..=100.0).contains(&summary.error_rate));
        let success_total = records
            .iter()
            .filter(|r| r.status == RecordStatus::Success)
            .count();
        let stat_sum: usize = summary.model_usage_stats.iter().map(|s| s.count).sum();
        assert_eq!(stat_sum, success_total);
        // 只有 7 号当天的记录计入今日
        assert_eq!(summary.daily_count, 1);
    }

    #[test]
    fn test_model_usage_sorted_desc_with_stable_ties() {
        let records = vec![
            record(1, "2025-07-07 10:00", 100, "A", 1, "w1", RecordStatus::Success),
            record(2, "2025-07-07 10:01", 101, "B", 1, "w1", RecordStatus::Success),
            record(3, "2025-07-07 10:02", 102, "C", 1, "w1", RecordStatus::Success),
            record(4, "2025-07-07 10:03", 103, "C", 1, "w1", RecordStatus::Success),
        ];
        let stats = summarize(&records, today()).model_usage_stats;

        assert_eq!(stats[0].model, "C");
        // A 与 B 并列, 保持首次出现顺序
        assert_eq!(stats[1].model, "A");
        assert_eq!(stats[2].model, "B");
    }

    #[test]
    fn test_last_used_compared_by_timestamp_not_string() {
        // 日期字符串顺序与时间戳顺序故意不一致
        let records = vec![
            record(1, "2025-07-07 09:59", 500, "A", 1, "w1", RecordStatus::Success),
            record(2, "2025-07-07 10:00", 400, "A", 1, "w1", RecordStatus::Success),
        ];
        let stats = summarize(&records, today()).model_usage_stats;
        assert_eq!(stats[0].last_used, "2025-07-07 09:59");
    }

    #[test]
    fn test_worker_activity_counts_all_statuses() {
        let records = vec![
            record(1, "2025-07-07 10:00", 100, "A", 5, "w1", RecordStatus::Success),
            record(2, "2025-07-07 11:00", 200, "A", 0, "w1", RecordStatus::Error),
            record(3, "2025-07-07 12:00", 300, "B", 3, "w2", RecordStatus::Success),
        ];
        let activity = worker_activity(&records);

        assert_eq!(activity.len(), 2);
        // w2 最近活跃, 排在前面
        assert_eq!(activity[0].worker_id, "w2");
        assert_eq!(activity[1].worker_id, "w1");
        assert_eq!(activity[1].total_records, 2);
        assert_eq!(activity[1].last_active, "2025-07-07 11:00");
    }
}

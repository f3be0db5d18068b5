// 内存模拟数据源 - 在真实后端就绪前提供固定+随机生成的记录

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use tokio::time::Duration;
use tracing::debug;

use super::DataService;
use crate::models::{now_ms, CaptureRecord, RecordMetadata};

/// 候选模型名称
const MODELS: [&str; 5] = [
    "Round Type",
    "Plate Type",
    "ND Press",
    "Baseboard",
    "Aluminum Stairs",
];

/// 候选工号
const WORKERS: [&str; 4] = ["12345", "23456", "34567", "45678"];

/// 候选工位
const LOCATIONS: [&str; 3] = ["Station A", "Station B", "Station C"];

/// 内存模拟数据源
///
/// 每次拉取都重新生成记录: 5 条固定种子记录加上若干条随机记录,
/// 并以固定延迟模拟网络往返
pub struct MockDataService {
    delay_ms: u64,
    generated_records: usize,
}

impl MockDataService {
    pub fn new(delay_ms: u64, generated_records: usize) -> Self {
        Self {
            delay_ms,
            generated_records,
        }
    }
}

#[async_trait]
impl DataService for MockDataService {
    async fn fetch_records(&self) -> Result<Vec<CaptureRecord>> {
        // 模拟后端延迟
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let records = build_records(now_ms(), self.generated_records);
        debug!("模拟数据源生成 {} 条记录", records.len());
        Ok(records)
    }

    fn source_kind(&self) -> &str {
        "mock"
    }
}

fn metadata(file_size: u64, location: &str) -> Option<RecordMetadata> {
    Some(RecordMetadata {
        file_size: Some(file_size),
        resolution: Some("1920x1080".to_string()),
        location: Some(location.to_string()),
    })
}

/// 生成一批模拟记录, 时间基于 `now_ms` 向前回溯
///
/// 时间戳与日期字符串由同一时刻派生, 保证两者一致
fn build_records(now_ms: i64, generated: usize) -> Vec<CaptureRecord> {
    let mut records = vec![
        CaptureRecord::success(
            1,
            now_ms - 7_200_000,
            MODELS[0],
            24,
            WORKERS[0],
            Some(0.95),
            metadata(2_048_000, LOCATIONS[0]),
        ),
        CaptureRecord::success(
            2,
            now_ms - 7_500_000,
            MODELS[1],
            18,
            WORKERS[1],
            Some(0.89),
            metadata(1_856_000, LOCATIONS[1]),
        ),
        CaptureRecord::success(
            3,
            now_ms - 7_800_000,
            MODELS[2],
            32,
            WORKERS[0],
            Some(0.92),
            metadata(2_204_000, LOCATIONS[0]),
        ),
        CaptureRecord::success(
            4,
            now_ms - 8_100_000,
            MODELS[3],
            12,
            WORKERS[2],
            Some(0.87),
            metadata(1_945_000, LOCATIONS[2]),
        ),
        CaptureRecord::failure(
            5,
            now_ms - 9_300_000,
            MODELS[4],
            WORKERS[1],
            "Image is blurry",
            Some(0.23),
            metadata(1_654_000, LOCATIONS[1]),
        ),
    ];

    let mut rng = rand::thread_rng();
    for i in 0..generated {
        let id = (i + 10) as i64;
        let timestamp = now_ms - (i as i64) * 600_000;
        let model = MODELS[i % MODELS.len()];
        let worker = WORKERS[i % WORKERS.len()];
        let meta = metadata(
            rng.gen_range(1_500_000..2_500_000),
            LOCATIONS[i % LOCATIONS.len()],
        );

        // 约一成记录模拟处理失败, 状态与失败原因由同一次判定产生
        let record = if rng.gen_bool(0.1) {
            CaptureRecord::failure(
                id,
                timestamp,
                model,
                worker,
                "Processing failed",
                Some(rng.gen_range(0.0..0.4)),
                meta,
            )
        } else {
            CaptureRecord::success(
                id,
                timestamp,
                model,
                rng.gen_range(1..=40),
                worker,
                Some(rng.gen_range(0.6..1.0)),
                meta,
            )
        };
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{date_string, RecordStatus};

    #[tokio::test]
    async fn test_fetch_returns_seed_and_generated_records() {
        let service = MockDataService::new(0, 15);
        let records = service.fetch_records().await.unwrap();
        assert_eq!(records.len(), 20);

        // 种子记录保持参考数据的内容
        assert_eq!(records[0].model, "Round Type");
        assert_eq!(records[0].count, 24);
        assert_eq!(records[4].status, RecordStatus::Error);
        assert_eq!(records[4].error_reason.as_deref(), Some("Image is blurry"));
    }

    #[test]
    fn test_ids_are_unique() {
        let records = build_records(now_ms(), 15);
        let mut ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_status_invariant_holds_for_all_records() {
        let records = build_records(now_ms(), 50);
        for record in &records {
            match record.status {
                RecordStatus::Success => assert!(record.error_reason.is_none()),
                RecordStatus::Error => {
                    assert!(record.error_reason.is_some());
                    assert_eq!(record.count, 0);
                }
            }
        }
    }

    #[test]
    fn test_date_string_matches_timestamp() {
        let records = build_records(now_ms(), 15);
        for record in &records {
            assert_eq!(record.date, date_string(record.timestamp));
        }
    }

    #[test]
    fn test_confidence_scores_in_range() {
        let records = build_records(now_ms(), 50);
        for record in &records {
            if let Some(score) = record.confidence_score {
                assert!((0.0..=1.0).contains(&score), "置信度超出范围: {}", score);
            }
        }
    }
}

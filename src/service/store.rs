// 记录快照存储 - 持有当前一批拍摄记录, 刷新时整批替换

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::DataService;
use crate::error::AppError;
use crate::models::{date_string, now_ms, CaptureRecord};

/// 一次刷新的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 刷新完成, 快照已替换
    Refreshed { total: usize },
    /// 已有刷新在执行, 本次请求被丢弃
    Skipped,
}

/// 记录快照存储
///
/// 读取方拿到的是 `Arc<Vec<CaptureRecord>>` 快照引用: 刷新期间旧快照仍然
/// 完整可读, 成功后一次性替换, 不存在部分更新。刷新失败保留旧快照。
pub struct RecordStore {
    service: Arc<dyn DataService>,
    snapshot: RwLock<Arc<Vec<CaptureRecord>>>,
    /// 最后一次成功刷新的时间 (毫秒时间戳)
    last_refresh_ms: RwLock<Option<i64>>,
    /// 刷新互斥: 同一时刻只允许一个刷新在途, 后到的请求被丢弃
    refresh_guard: Mutex<()>,
}

impl RecordStore {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self {
            service,
            snapshot: RwLock::new(Arc::new(Vec::new())),
            last_refresh_ms: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    /// 首次加载, 与 `refresh` 同一契约
    pub async fn load(&self) -> Result<usize, AppError> {
        match self.refresh().await? {
            RefreshOutcome::Refreshed { total } => Ok(total),
            RefreshOutcome::Skipped => Ok(self.snapshot().await.len()),
        }
    }

    /// 重新拉取记录并替换快照
    ///
    /// 幂等, 可重复调用。若已有刷新在途则直接返回 `Skipped`,
    /// 避免对数据源发起冗余的并发请求
    pub async fn refresh(&self) -> Result<RefreshOutcome, AppError> {
        let Ok(_guard) = self.refresh_guard.try_lock() else {
            debug!("已有刷新任务在执行, 丢弃本次刷新请求");
            return Ok(RefreshOutcome::Skipped);
        };

        match self.service.fetch_records().await {
            Ok(records) => {
                let total = records.len();
                *self.snapshot.write().await = Arc::new(records);
                *self.last_refresh_ms.write().await = Some(now_ms());
                info!("记录快照已刷新, 共 {} 条", total);
                Ok(RefreshOutcome::Refreshed { total })
            }
            Err(e) => {
                // 失败时保留旧快照, 等待下个刷新周期
                warn!("拉取记录失败, 保留现有快照: {}", e);
                Err(AppError::source_unavailable(e))
            }
        }
    }

    /// 获取当前快照
    pub async fn snapshot(&self) -> Arc<Vec<CaptureRecord>> {
        self.snapshot.read().await.clone()
    }

    /// 最后一次成功刷新时间的日期字符串
    pub async fn last_refresh(&self) -> Option<String> {
        self.last_refresh_ms.read().await.map(date_string)
    }

    /// 数据源类型标识
    pub fn source_kind(&self) -> &str {
        self.service.source_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaptureRecord;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::time::Duration;

    /// 测试数据源: 可随时切换为故障状态, 可配置响应延迟
    struct ToggleService {
        failing: AtomicBool,
        delay_ms: u64,
    }

    impl ToggleService {
        fn new(delay_ms: u64) -> Self {
            Self {
                failing: AtomicBool::new(false),
                delay_ms,
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl super::super::DataService for ToggleService {
        async fn fetch_records(&self) -> Result<Vec<CaptureRecord>> {
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                bail!("backend offline");
            }
            Ok(vec![CaptureRecord::success(
                1,
                1_700_000_000_000,
                "Round Type",
                24,
                "12345",
                Some(0.9),
                None,
            )])
        }

        fn source_kind(&self) -> &str {
            "toggle"
        }
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot() {
        let store = RecordStore::new(Arc::new(ToggleService::new(0)));
        assert!(store.snapshot().await.is_empty());

        let total = store.load().await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(store.snapshot().await.len(), 1);
        assert!(store.last_refresh().await.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let service = Arc::new(ToggleService::new(0));
        let store = RecordStore::new(service.clone());
        store.load().await.unwrap();

        service.set_failing(true);
        let err = store.refresh().await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));

        // 刷新失败后旧快照仍然可读
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_is_dropped() {
        let store = Arc::new(RecordStore::new(Arc::new(ToggleService::new(200))));

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.refresh().await })
        };
        // 等待第一个刷新进入在途状态
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = store.refresh().await.unwrap();
        assert_eq!(second, RefreshOutcome::Skipped);

        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, RefreshOutcome::Refreshed { total: 1 }));
    }
}

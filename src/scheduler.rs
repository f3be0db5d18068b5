// 刷新调度器 - 按固定间隔重新加载记录快照
//
// 并发保护在 RecordStore 内部: 在途刷新未结束时新的请求被丢弃,
// 调度器本身只负责节拍

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

use crate::event_bus::{AppEvent, EventBus};
use crate::service::{RecordStore, RefreshOutcome};

/// 周期刷新调度器
pub struct RefreshScheduler {
    store: Arc<RecordStore>,
    /// 刷新间隔(秒)
    interval_secs: u64,
}

impl RefreshScheduler {
    pub fn new(store: Arc<RecordStore>, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs: interval_secs.max(1),
        }
    }

    /// 在后台任务中启动调度循环
    pub fn start(self: Arc<Self>, event_bus: Arc<EventBus>) {
        info!("启动刷新调度器, 间隔 {} 秒", self.interval_secs);
        tokio::task::spawn(async move {
            self.run(event_bus).await;
        });
    }

    /// 调度循环主体, 永不返回
    ///
    /// 刷新失败只记录并发布事件, 不做额外重试, 等待下个周期
    pub async fn run(&self, event_bus: Arc<EventBus>) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));
        // interval 的第一次 tick 立即完成, 跳过以避免与启动时的初始加载重复
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match self.store.refresh().await {
                Ok(RefreshOutcome::Refreshed { total }) => {
                    event_bus.publish(AppEvent::RecordsRefreshed { total });
                }
                Ok(RefreshOutcome::Skipped) => {
                    debug!("上一轮刷新未结束, 本周期跳过");
                }
                Err(e) => {
                    error!("定时刷新失败: {}", e);
                    event_bus.publish(AppEvent::RefreshFailed {
                        error: e.to_string(),
                    });
                }
            }
        }
    }
}

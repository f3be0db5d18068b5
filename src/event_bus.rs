// 事件总线 - 用于模块间解耦通信
//
// 实现发布/订阅模式,消除模块间的直接依赖关系
// 使用 tokio::sync::broadcast 实现高效的事件分发

use tokio::sync::broadcast;

/// 应用事件枚举 - 定义所有可能的系统事件
#[derive(Debug, Clone)]
pub enum AppEvent {
    // --- 数据事件 ---

    /// 记录快照刷新完成
    RecordsRefreshed {
        total: usize,
    },

    /// 刷新失败 (旧快照保留)
    RefreshFailed {
        error: String,
    },

    // --- 身份事件 ---

    /// 工作人员登录
    WorkerSignedIn {
        worker_id: String,
    },

    /// 工作人员登出
    WorkerSignedOut,

    // --- 系统事件 ---

    /// 配置更新事件
    ConfigUpdated,

    /// CSV 导出完成
    ExportCompleted {
        filename: String,
        rows: usize,
    },
}

/// 事件总线 - 用于模块间解耦通信
///
/// 使用 broadcast channel 实现发布/订阅模式
/// 支持多个订阅者同时接收事件
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    ///
    /// # 参数
    /// - `capacity`: 事件缓冲区大小,建议 100-1000
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 发布事件
    ///
    /// 如果没有订阅者,事件会被丢弃(这是正常的)
    pub fn publish(&self, event: AppEvent) {
        match self.sender.send(event) {
            Ok(receiver_count) => {
                tracing::trace!("事件已发布，订阅者数量: {}", receiver_count);
            }
            Err(_) => {
                // 没有订阅者,忽略错误
                tracing::trace!("事件已发布但无订阅者");
            }
        }
    }

    /// 订阅事件
    ///
    /// 返回一个接收器,可以用 `.recv().await` 接收事件
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// 获取当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_basic() {
        let bus = EventBus::new(100);

        // 订阅事件
        let mut receiver = bus.subscribe();

        // 发布事件
        bus.publish(AppEvent::RecordsRefreshed { total: 20 });

        // 接收事件
        match receiver.recv().await {
            Ok(AppEvent::RecordsRefreshed { total }) => {
                assert_eq!(total, 20);
            }
            _ => panic!("未收到预期事件"),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(100);

        // 创建多个订阅者
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        // 发布事件
        bus.publish(AppEvent::WorkerSignedIn {
            worker_id: "W1001".to_string(),
        });

        // 两个订阅者都应该收到事件
        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_ok());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(8);
        // 无订阅者时不应 panic
        bus.publish(AppEvent::WorkerSignedOut);
    }
}

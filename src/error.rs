// 错误定义 - 应用统一错误类型

use thiserror::Error;

/// 应用错误
///
/// 设计上只有两类可恢复错误:
/// - 数据源故障降级为前端可见的"加载失败"状态, 下个刷新周期自动重试
/// - 校验失败在本地拒绝, 不产生任何副作用
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源不可用(加载/刷新失败)
    #[error("数据源不可用: {0}")]
    SourceUnavailable(String),

    /// 输入校验失败(例如工号为空)
    #[error("输入校验失败: {0}")]
    Validation(String),
}

impl AppError {
    /// 包装底层错误为数据源不可用
    pub fn source_unavailable(err: impl std::fmt::Display) -> Self {
        AppError::SourceUnavailable(err.to_string())
    }

    /// 构造校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

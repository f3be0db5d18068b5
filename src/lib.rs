// 数点管理后台 - Tauri应用主库

// 声明模块
pub mod app;
pub mod commands;
pub mod domains;
pub mod error;
pub mod event_bus;
pub mod export;
pub mod identity;
pub mod logger;
pub mod models;
pub mod query;
pub mod scheduler;
pub mod service;
pub mod settings;
pub mod stats;

use std::sync::Arc;

use domains::{DataDomain, IdentityDomain, SystemDomain};
use event_bus::EventBus;

/// 应用状态（按领域分组）
///
/// - 数据领域：负责记录快照与应用配置
/// - 身份领域：负责当前工作人员身份
/// - 系统领域：负责日志和基础设施
/// - 事件总线：用于领域间解耦通信
#[derive(Clone)]
pub struct AppState {
    /// 数据领域管理器
    pub data_domain: Arc<DataDomain>,
    /// 身份领域管理器
    pub identity_domain: Arc<IdentityDomain>,
    /// 系统领域管理器
    pub system_domain: Arc<SystemDomain>,
    /// 事件总线
    pub event_bus: Arc<EventBus>,
}

pub use app::run;

//! Tauri 命令模块
//!
//! 提供前端调用的所有 Tauri 命令接口，按功能分组：
//! - query: 数据查询命令
//! - config: 配置管理命令
//! - control: 系统控制命令
//! - export: CSV 导出命令
//! - identity: 工作人员身份命令

pub mod config;
pub mod control;
pub mod export;
pub mod identity;
pub mod query;

// 重新导出所有命令
pub use config::*;
pub use control::*;
pub use export::*;
pub use identity::*;
pub use query::*;

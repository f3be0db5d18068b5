// 领域模块 - 用于组织应用的业务逻辑
//
// 将 AppState 按业务领域分组,实现单一职责原则
// 包含3个领域:数据、身份、系统

pub mod data;
pub mod identity;
pub mod system;

pub use data::DataDomain;
pub use identity::IdentityDomain;
pub use system::SystemDomain;

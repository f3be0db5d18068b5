// 数据领域管理器
//
// 负责记录快照与应用配置相关的功能
// 包含 RecordStore 和 SettingsManager 两个核心组件

use std::sync::Arc;

use crate::service::RecordStore;
use crate::settings::SettingsManager;

/// 数据领域管理器 - 负责记录快照与应用配置
#[derive(Clone)]
pub struct DataDomain {
    store: Arc<RecordStore>,
    settings: Arc<SettingsManager>,
}

impl DataDomain {
    /// 创建新的数据领域管理器
    pub fn new(store: Arc<RecordStore>, settings: Arc<SettingsManager>) -> Self {
        Self { store, settings }
    }

    /// 获取记录仓库
    pub fn get_store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// 获取设置管理器
    pub fn get_settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }
}

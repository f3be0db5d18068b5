// 身份领域管理器
//
// 负责当前工作人员身份的读取、登录与登出

use std::sync::Arc;

use crate::identity::IdentityManager;

/// 身份领域管理器 - 负责当前工作人员身份
#[derive(Clone)]
pub struct IdentityDomain {
    manager: Arc<IdentityManager>,
}

impl IdentityDomain {
    /// 创建新的身份领域管理器
    pub fn new(manager: Arc<IdentityManager>) -> Self {
        Self { manager }
    }

    /// 获取身份管理器
    pub fn get_manager(&self) -> &Arc<IdentityManager> {
        &self.manager
    }
}

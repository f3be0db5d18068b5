// 工作人员身份 - 文件持久化的当前登录身份与演示用自动填充
//
// 这不是鉴权系统: 工号仅用于在记录上标注提交人, 不构成访问控制边界

use std::path::PathBuf;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::AppError;
use crate::models::{WorkerIdentity, WorkerProfile};

/// 演示用示例工作人员档案
const SAMPLE_WORKERS: [(&str, &str, &str, &str); 15] = [
    ("W1001", "John Smith", "Quality Control", "Morning"),
    ("W1002", "Sarah Johnson", "Production", "Evening"),
    ("W1003", "Mike Wilson", "Packaging", "Night"),
    ("W1004", "Emma Davis", "Quality Control", "Morning"),
    ("W1005", "David Brown", "Maintenance", "Day"),
    ("W1006", "Lisa Garcia", "Production", "Evening"),
    ("W1007", "Chris Miller", "Logistics", "Morning"),
    ("W1008", "Anna Taylor", "Quality Control", "Night"),
    ("W1009", "James Moore", "Production", "Day"),
    ("W1010", "Maria Rodriguez", "Packaging", "Evening"),
    ("W1011", "Robert Lee", "Maintenance", "Morning"),
    ("W1012", "Jennifer White", "Quality Control", "Day"),
    ("W1013", "Michael Clark", "Production", "Night"),
    ("W1014", "Jessica Martinez", "Logistics", "Morning"),
    ("W1015", "William Lopez", "Packaging", "Evening"),
];

/// 随机生成一个 W+4位数字 格式的工号
pub fn generate_worker_id() -> String {
    let mut rng = rand::thread_rng();
    format!("W{}", rng.gen_range(1000..10000))
}

/// 随机取一份示例档案, 用于登录表单的演示自动填充
pub fn suggest_credentials() -> WorkerProfile {
    let mut rng = rand::thread_rng();
    let (id, name, department, shift) = *SAMPLE_WORKERS
        .choose(&mut rng)
        .expect("示例档案列表不为空");
    WorkerProfile {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        shift: shift.to_string(),
    }
}

/// 当前工作人员身份管理器
///
/// 身份作为显式上下文对象持有, 不使用全局可变状态;
/// 以 JSON 文件持久化在应用数据目录下
pub struct IdentityManager {
    path: PathBuf,
    data: RwLock<Option<WorkerIdentity>>,
}

impl IdentityManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<WorkerIdentity>(&bytes).ok()
            }
            _ => None,
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    /// 当前登录的身份, 未登录返回 None
    pub async fn current(&self) -> Option<WorkerIdentity> {
        self.data.read().await.clone()
    }

    /// 登录: 记录工号与可选显示名并持久化
    ///
    /// 工号两端空白会被去除, 去除后为空则拒绝
    pub async fn sign_in(
        &self,
        id: &str,
        display_name: Option<&str>,
    ) -> Result<WorkerIdentity, AppError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::validation("工号不能为空"));
        }

        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let identity = WorkerIdentity {
            id: id.to_string(),
            display_name,
        };

        let mut data = self.data.write().await;
        *data = Some(identity.clone());
        self.persist(data.as_ref()).await?;

        info!("工作人员已登录: {}", identity.id);
        Ok(identity)
    }

    /// 登出: 清除身份并持久化
    pub async fn sign_out(&self) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        *data = None;
        self.persist(None).await?;
        info!("工作人员已登出");
        Ok(())
    }

    async fn persist(&self, identity: Option<&WorkerIdentity>) -> Result<(), AppError> {
        match identity {
            Some(identity) => {
                let json = serde_json::to_string_pretty(identity)
                    .map_err(AppError::source_unavailable)?;
                tokio::fs::write(&self.path, json)
                    .await
                    .map_err(AppError::source_unavailable)?;
            }
            None => {
                if let Err(e) = tokio::fs::remove_file(&self.path).await {
                    // 文件本就不存在无需处理
                    if e.kind() != std::io::ErrorKind::NotFound {
                        return Err(AppError::source_unavailable(e));
                    }
                }
            }
        }
        Ok(())
    }
}

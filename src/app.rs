//! 应用程序初始化和启动
//!
//! 负责 Tauri 应用的完整启动流程，包括：
//! - 日志系统初始化
//! - 各领域模块初始化
//! - 后台刷新任务启动
//! - Tauri Builder 配置
//! - 命令注册

use std::sync::Arc;

use tauri::Manager;
use tracing::{error, info};

use crate::commands::*;
use crate::domains::{DataDomain, IdentityDomain, SystemDomain};
use crate::event_bus::EventBus;
use crate::identity::IdentityManager;
use crate::logger;
use crate::scheduler::RefreshScheduler;
use crate::service::{self, RecordStore};
use crate::settings::SettingsManager;
use crate::AppState;

/// 应用程序入口点
///
/// 初始化并启动 Tauri 应用，包含以下步骤：
/// 1. 日志系统初始化
/// 2. 应用数据目录创建
/// 3. 领域模块初始化
/// 4. 后台刷新任务启动
/// 5. Tauri 命令注册
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // 创建日志广播器
    let log_broadcaster = Arc::new(logger::LogBroadcaster::new());

    // 初始化日志系统（带前端推送功能）
    logger::init_with_broadcaster(log_broadcaster.clone()).expect("Failed to initialize logger");

    tauri::Builder::default()
        .setup(move |app| {
            info!("初始化数点管理后台...");

            // 设置日志广播器的 app handle
            log_broadcaster.set_app_handle(app.handle().clone());

            let app_dir = app.path().app_data_dir().map_err(|e| e.to_string())?;
            std::fs::create_dir_all(&app_dir).map_err(|e| e.to_string())?;

            // 初始化运行时（仅用于初始化，后台任务使用独立运行时）
            let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;

            let (state, scheduler) = runtime.block_on(async {
                // 先初始化设置管理器，以便读取数据源配置
                let settings = Arc::new(
                    SettingsManager::new(app_dir.join("config.json"))
                        .await
                        .expect("设置管理器初始化失败"),
                );

                // 读取初始配置
                let initial_config = settings.get().await;

                // 创建共享的 HTTP 客户端（复用连接池）
                let http_client = reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(30))
                    .pool_max_idle_per_host(10)
                    .build()
                    .expect("无法创建 HTTP 客户端");

                // 根据配置创建数据服务与记录仓库
                let data_service =
                    service::create_service(&initial_config.data_source, http_client.clone());
                info!("数据源类型: {}", data_service.source_kind());
                let store = Arc::new(RecordStore::new(data_service));

                // 初始化身份管理器
                let identity_manager = Arc::new(
                    IdentityManager::new(app_dir.join("worker.json"))
                        .await
                        .expect("身份管理器初始化失败"),
                );

                // 初始化刷新调度器
                let scheduler = Arc::new(RefreshScheduler::new(
                    store.clone(),
                    initial_config.refresh_interval_secs,
                ));

                // ==================== 组装领域管理器 ====================

                let data_domain = Arc::new(DataDomain::new(store, settings));
                let identity_domain = Arc::new(IdentityDomain::new(identity_manager));
                let system_domain = Arc::new(SystemDomain::new(
                    log_broadcaster.clone(),
                    Arc::new(http_client),
                ));

                // 创建事件总线（容量1000,足够缓冲）
                let event_bus = Arc::new(EventBus::new(1000));

                info!("领域管理器已初始化完成");

                let app_state = AppState {
                    data_domain,
                    identity_domain,
                    system_domain,
                    event_bus,
                };

                (app_state, scheduler)
            });

            // 启动后台任务
            {
                let state_clone = state.clone();
                std::thread::spawn(move || {
                    let rt = tokio::runtime::Runtime::new()
                        .expect("无法创建 Tokio 运行时，程序无法继续运行");
                    rt.block_on(async {
                        info!("启动后台任务...");

                        // 初始数据加载, 失败时保持空快照等待下个刷新周期
                        match state_clone.data_domain.get_store().load().await {
                            Ok(total) => info!("初始数据加载完成, 共 {} 条记录", total),
                            Err(e) => error!("初始数据加载失败: {}", e),
                        }

                        // 调度循环常驻本运行时, 永不返回
                        scheduler.run(state_clone.event_bus.clone()).await;
                    });
                });
            }

            app.manage(state);
            Ok(())
        })
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            get_dashboard_summary,
            get_records_page,
            get_filter_options,
            get_worker_activity,
            get_record,
            refresh_records,
            get_system_status,
            set_log_stream_enabled,
            get_app_config,
            update_app_config,
            export_all_csv,
            export_filtered_csv,
            save_csv_export,
            get_current_worker,
            sign_in_worker,
            sign_out_worker,
            suggest_worker_credentials,
            generate_worker_id,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

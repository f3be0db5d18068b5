// 查询领域 - 记录过滤、分页与筛选项提取

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{CaptureRecord, FilterCriteria};

/// 图库默认分页大小
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// 一页查询结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    /// 当前页的记录
    pub records: Vec<CaptureRecord>,
    /// 过滤后的总页数 (空结果为 0)
    pub total_pages: usize,
    /// 实际返回的页码 (越界请求会被收敛)
    pub page: usize,
    /// 过滤后的记录总数
    pub total_records: usize,
}

/// 筛选控件的候选项, 从未过滤的快照提取
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// 全部模型名称, 升序去重
    pub models: Vec<String>,
    /// 全部工号, 升序去重
    pub workers: Vec<String>,
}

/// 按条件过滤记录, 所有已设置的条件取 AND
///
/// 日期范围为闭区间, 依赖日期字符串 "YYYY-MM-DD HH:MM" 按字典序可比较:
/// 结束日期补上 " 23:59:59" 使当天最后一条记录也被包含
pub fn filter(records: &[CaptureRecord], criteria: &FilterCriteria) -> Vec<CaptureRecord> {
    let end_bound = criteria.end_date.as_ref().map(|d| format!("{} 23:59:59", d));

    records
        .iter()
        .filter(|r| {
            if let Some(model) = &criteria.model {
                if &r.model != model {
                    return false;
                }
            }
            if let Some(worker_id) = &criteria.worker_id {
                if &r.worker_id != worker_id {
                    return false;
                }
            }
            if let Some(status) = &criteria.status {
                if &r.status != status {
                    return false;
                }
            }
            if let Some(start) = &criteria.start_date {
                if r.date.as_str() < start.as_str() {
                    return false;
                }
            }
            if let Some(end) = &end_bound {
                if r.date.as_str() > end.as_str() {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// 对记录序列分页
///
/// - `total_pages = ceil(len / page_size)`, 空输入为 0 页
/// - 页码小于 1 收敛到第 1 页, 超出范围收敛到最后一页
/// - 每页最多返回 `page_size` 条
pub fn paginate(records: &[CaptureRecord], page_size: usize, page: usize) -> RecordPage {
    let page_size = page_size.max(1);
    let total_pages = (records.len() + page_size - 1) / page_size;

    if total_pages == 0 {
        return RecordPage {
            records: Vec::new(),
            total_pages: 0,
            page: 1,
            total_records: 0,
        };
    }

    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(records.len());

    RecordPage {
        records: records[start..end].to_vec(),
        total_pages,
        page,
        total_records: records.len(),
    }
}

/// 从未过滤的快照提取筛选候选项
pub fn filter_options(records: &[CaptureRecord]) -> FilterOptions {
    let models: BTreeSet<String> = records.iter().map(|r| r.model.clone()).collect();
    let workers: BTreeSet<String> = records.iter().map(|r| r.worker_id.clone()).collect();

    FilterOptions {
        models: models.into_iter().collect(),
        workers: workers.into_iter().collect(),
    }
}

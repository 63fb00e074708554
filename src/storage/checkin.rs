//! 打卡记录仓储
//!
//! 管理 `checkin-storage` 作用域：每个自然日至多一条打卡记录，
//! 以及派生的连续打卡天数。同一天的多次打卡只会合并计数，
//! 连续天数仅在当日首次打卡（新建分支）时计算一次。

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::models::{CheckInDraft, CheckInRecord};
use crate::storage::{load_scope_state, save_scope_state, ScopeStore, StorageResult, CHECKIN_SCOPE};

// ============================================================
// CheckInState - 持久化状态
// ============================================================

/// `checkin-storage` 作用域的完整状态快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInState {
    /// 全部打卡记录，每个日期至多一条
    pub check_ins: Vec<CheckInRecord>,
    /// 连续打卡天数
    pub streak: u32,
    /// 最近一次打卡日期
    pub last_check_in: Option<NaiveDate>,
}

// ============================================================
// CheckInLedger - 打卡仓储
// ============================================================

/// 打卡记录仓储
pub struct CheckInLedger {
    state: CheckInState,
    store: Arc<dyn ScopeStore>,
}

impl CheckInLedger {
    /// 从持久化存储加载仓储
    pub fn load(store: Arc<dyn ScopeStore>) -> Self {
        let state = load_scope_state(store.as_ref(), CHECKIN_SCOPE);
        Self { state, store }
    }

    fn persist(&self) -> StorageResult<()> {
        save_scope_state(self.store.as_ref(), CHECKIN_SCOPE, &self.state)
    }

    // ========== 打卡 ==========

    /// 以本地当日日期打卡
    pub fn check_in(&mut self, draft: &CheckInDraft) -> StorageResult<()> {
        self.check_in_on(Local::now().date_naive(), draft)
    }

    /// 以指定日期打卡
    ///
    /// 当日已有记录时走合并分支：仅覆盖草稿中提供的计数字段并
    /// 标记完成，不触碰连续天数。当日无记录时新建记录，并重新
    /// 计算连续天数：昨日有记录则 +1，否则重置为 1。
    pub fn check_in_on(&mut self, date: NaiveDate, draft: &CheckInDraft) -> StorageResult<()> {
        let mut merged = false;
        if let Some(existing) = self.state.check_ins.iter_mut().find(|c| c.date == date) {
            existing.merge(draft);
            merged = true;
        }

        if merged {
            return self.persist();
        }

        let record = CheckInRecord::from_draft(date, draft);
        let has_yesterday = date
            .pred_opt()
            .map(|yesterday| self.state.check_ins.iter().any(|c| c.date == yesterday))
            .unwrap_or(false);

        self.state.streak = if has_yesterday {
            self.state.streak + 1
        } else {
            1
        };
        self.state.last_check_in = Some(date);
        self.state.check_ins.push(record);

        log::debug!("打卡: {date}, 连续 {} 天", self.state.streak);
        self.persist()
    }

    // ========== 查询 ==========

    /// 今日（本地日期）是否已完成打卡
    pub fn is_checked_in_today(&self) -> bool {
        self.is_checked_in_on(Local::now().date_naive())
    }

    /// 指定日期是否已完成打卡
    pub fn is_checked_in_on(&self, date: NaiveDate) -> bool {
        self.state
            .check_ins
            .iter()
            .any(|c| c.date == date && c.completed)
    }

    /// 按日期查询打卡记录
    pub fn by_date(&self, date: NaiveDate) -> Option<&CheckInRecord> {
        self.state.check_ins.iter().find(|c| c.date == date)
    }

    /// 按月份筛选打卡记录（month 取 1-12）
    pub fn by_month(&self, year: i32, month: u32) -> Vec<&CheckInRecord> {
        self.state
            .check_ins
            .iter()
            .filter(|c| c.date.year() == year && c.date.month() == month)
            .collect()
    }

    /// 今日打卡记录
    pub fn today(&self) -> Option<&CheckInRecord> {
        self.by_date(Local::now().date_naive())
    }

    /// 连续打卡天数
    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    /// 最近一次打卡日期
    pub fn last_check_in(&self) -> Option<NaiveDate> {
        self.state.last_check_in
    }

    /// 全部打卡记录
    pub fn records(&self) -> &[CheckInRecord] {
        &self.state.check_ins
    }
}

// ============================================================
// 测试
// ============================================================

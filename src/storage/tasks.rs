//! 每日任务仓储
//!
//! 管理 `task-storage` 作用域：四个固定目标的每日任务，进度只增
//! 不减且封顶于目标值。任务集带有初始化日期戳，跨天后由
//! `init_today` 显式重建，同一天内绝不覆盖已有进度。

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::models::{DailyTask, TaskType};
use crate::storage::{load_scope_state, save_scope_state, ScopeStore, StorageResult, TASK_SCOPE};

// ============================================================
// TaskState - 持久化状态
// ============================================================

/// `task-storage` 作用域的完整状态快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskState {
    /// 任务集对应的自然日，旧快照可能没有该字段
    pub date: Option<NaiveDate>,
    /// 今日任务集
    pub today_tasks: Vec<DailyTask>,
}

/// 固定的每日任务表
fn default_tasks() -> Vec<DailyTask> {
    vec![
        DailyTask::new("t1", TaskType::Listen, 30, "分钟"),
        DailyTask::new("t2", TaskType::Practice, 10, "个"),
        DailyTask::new("t3", TaskType::Review, 20, "个"),
        DailyTask::new("t4", TaskType::Video, 1, "个"),
    ]
}

// ============================================================
// TaskLedger - 每日任务仓储
// ============================================================

/// 每日任务仓储
pub struct TaskLedger {
    state: TaskState,
    store: Arc<dyn ScopeStore>,
}

impl TaskLedger {
    /// 从持久化存储加载仓储
    pub fn load(store: Arc<dyn ScopeStore>) -> Self {
        let state = load_scope_state(store.as_ref(), TASK_SCOPE);
        Self { state, store }
    }

    fn persist(&self) -> StorageResult<()> {
        save_scope_state(self.store.as_ref(), TASK_SCOPE, &self.state)
    }

    // ========== 初始化 ==========

    /// 初始化今日（本地日期）任务集
    pub fn init_today(&mut self) -> StorageResult<()> {
        self.init_on(Local::now().date_naive())
    }

    /// 初始化指定日期的任务集
    ///
    /// 任务集为空、无日期戳或日期戳早于 `date` 时重建为固定任务表；
    /// 同一天内重复调用是空操作，不会丢失已累计的进度。
    pub fn init_on(&mut self, date: NaiveDate) -> StorageResult<()> {
        if !self.state.today_tasks.is_empty() && self.state.date == Some(date) {
            return Ok(());
        }

        self.state.today_tasks = default_tasks();
        self.state.date = Some(date);
        log::debug!("初始化 {date} 的每日任务");
        self.persist()
    }

    // ========== 进度更新 ==========

    /// 累加任务进度
    ///
    /// 进度封顶于目标值并重算完成状态。对应类型的任务不存在时
    /// 静默返回。
    pub fn update_progress(&mut self, task_type: TaskType, delta: u32) -> StorageResult<()> {
        let mut changed = false;
        if let Some(task) = self
            .state
            .today_tasks
            .iter_mut()
            .find(|t| t.task_type == task_type)
        {
            task.apply_progress(delta);
            changed = true;
        }

        if !changed {
            return Ok(());
        }
        self.persist()
    }

    /// 强制完成指定类型的任务
    pub fn complete(&mut self, task_type: TaskType) -> StorageResult<()> {
        let mut changed = false;
        if let Some(task) = self
            .state
            .today_tasks
            .iter_mut()
            .find(|t| t.task_type == task_type)
        {
            task.force_complete();
            changed = true;
        }

        if !changed {
            return Ok(());
        }
        self.persist()
    }

    // ========== 查询 ==========

    /// 已完成任务数
    pub fn completed_count(&self) -> usize {
        self.state
            .today_tasks
            .iter()
            .filter(|t| t.completed)
            .count()
    }

    /// 任务总数
    pub fn total_count(&self) -> usize {
        self.state.today_tasks.len()
    }

    /// 是否全部完成
    pub fn all_completed(&self) -> bool {
        self.state.today_tasks.iter().all(|t| t.completed)
    }

    /// 按类型查询任务
    pub fn task(&self, task_type: TaskType) -> Option<&DailyTask> {
        self.state
            .today_tasks
            .iter()
            .find(|t| t.task_type == task_type)
    }

    /// 今日任务集
    pub fn tasks(&self) -> &[DailyTask] {
        &self.state.today_tasks
    }
}

// ============================================================
// 测试
// ============================================================

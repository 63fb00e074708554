//! 生词本与学习记录仓储
//!
//! 管理 `learning-storage` 作用域下的全部学习状态：生词本、
//! 学习记录、累计学习时长与已观看视频集合。所有对不存在条目的
//! 操作都是静默无副作用的，保证 UI 交互幂等。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::models::{StudyRecord, VocabularyEntry, WordStatus};
use crate::storage::{load_scope_state, save_scope_state, ScopeStore, StorageResult, LEARNING_SCOPE};

// ============================================================
// LearningState - 持久化状态
// ============================================================

/// `learning-storage` 作用域的完整状态快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningState {
    /// 生词本，每个 wordId 至多一条
    pub vocabulary: Vec<VocabularyEntry>,
    /// 学习记录（追加式日志）
    pub study_records: Vec<StudyRecord>,
    /// 累计学习时长（分钟）
    pub total_study_time: u64,
    /// 已观看的视频 ID 集合
    pub watched_videos: Vec<String>,
}

// ============================================================
// LearningLedger - 生词本仓储
// ============================================================

/// 生词本与学习记录仓储
pub struct LearningLedger {
    state: LearningState,
    store: Arc<dyn ScopeStore>,
}

impl LearningLedger {
    /// 从持久化存储加载仓储，损坏或缺失的快照回退为空状态
    pub fn load(store: Arc<dyn ScopeStore>) -> Self {
        let state = load_scope_state(store.as_ref(), LEARNING_SCOPE);
        Self { state, store }
    }

    fn persist(&self) -> StorageResult<()> {
        save_scope_state(self.store.as_ref(), LEARNING_SCOPE, &self.state)
    }

    // ========== 生词本 ==========

    /// 添加生词
    ///
    /// 条目已存在时静默返回，不修改任何状态（幂等创建）。
    pub fn add_word(&mut self, word_id: &str, source_video_id: &str) -> StorageResult<()> {
        if self.state.vocabulary.iter().any(|e| e.word_id == word_id) {
            return Ok(());
        }

        log::debug!("生词本添加单词: {word_id}");
        self.state
            .vocabulary
            .push(VocabularyEntry::new(word_id, source_video_id));
        self.persist()
    }

    /// 移除生词，条目不存在时静默返回
    pub fn remove_word(&mut self, word_id: &str) -> StorageResult<()> {
        let before = self.state.vocabulary.len();
        self.state.vocabulary.retain(|e| e.word_id != word_id);

        if self.state.vocabulary.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// 更新掌握状态
    ///
    /// 同时记录复习时间并累加复习次数。条目不存在时静默返回。
    pub fn set_status(&mut self, word_id: &str, status: WordStatus) -> StorageResult<()> {
        let mut changed = false;
        if let Some(entry) = self
            .state
            .vocabulary
            .iter_mut()
            .find(|e| e.word_id == word_id)
        {
            entry.transition(status);
            changed = true;
        }

        if !changed {
            return Ok(());
        }
        self.persist()
    }

    /// 查询单个生词条目
    pub fn word(&self, word_id: &str) -> Option<&VocabularyEntry> {
        self.state.vocabulary.iter().find(|e| e.word_id == word_id)
    }

    /// 生词本全部条目
    pub fn vocabulary(&self) -> &[VocabularyEntry] {
        &self.state.vocabulary
    }

    /// 按掌握状态统计数量
    pub fn count_by_status(&self, status: WordStatus) -> usize {
        self.state
            .vocabulary
            .iter()
            .filter(|e| e.status == status)
            .count()
    }

    // ========== 学习记录 ==========

    /// 追加一条学习记录
    pub fn record_study(&mut self, record: StudyRecord) -> StorageResult<()> {
        self.state.study_records.push(record);
        self.persist()
    }

    /// 全部学习记录
    pub fn study_records(&self) -> &[StudyRecord] {
        &self.state.study_records
    }

    /// 累加学习时长（分钟）
    pub fn add_study_minutes(&mut self, minutes: u64) -> StorageResult<()> {
        self.state.total_study_time += minutes;
        self.persist()
    }

    /// 累计学习时长（分钟）
    pub fn total_study_minutes(&self) -> u64 {
        self.state.total_study_time
    }

    // ========== 观看记录 ==========

    /// 标记视频已观看，重复标记静默去重
    pub fn mark_watched(&mut self, video_id: &str) -> StorageResult<()> {
        if self.state.watched_videos.iter().any(|v| v == video_id) {
            return Ok(());
        }

        self.state.watched_videos.push(video_id.to_string());
        self.persist()
    }

    /// 视频是否已观看
    pub fn is_watched(&self, video_id: &str) -> bool {
        self.state.watched_videos.iter().any(|v| v == video_id)
    }

    /// 已观看的视频 ID 列表
    pub fn watched_videos(&self) -> &[String] {
        &self.state.watched_videos
    }
}

// ============================================================
// 测试
// ============================================================

//! 数据模型定义
//!
//! 定义持久化所需的所有数据结构。字段名以 camelCase 序列化，
//! 沿用前端状态层的命名约定。

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================
// WordStatus - 单词掌握状态
// ============================================================

/// 单词掌握状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    /// 新词
    New,
    /// 学习中
    Learning,
    /// 已掌握
    Mastered,
}

impl WordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Mastered => "mastered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "learning" => Some(Self::Learning),
            "mastered" => Some(Self::Mastered),
            _ => None,
        }
    }
}

// ============================================================
// VocabularyEntry - 生词本条目
// ============================================================

/// 生词本条目
///
/// 每个单词至多一条记录，以 `word_id` 为唯一键。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    /// 单词 ID（目录中的标识）
    pub word_id: String,
    /// 掌握状态
    pub status: WordStatus,
    /// 加入生词本的时间
    pub added_at: DateTime<Utc>,
    /// 最后复习时间
    pub last_reviewed: Option<DateTime<Utc>>,
    /// 复习次数
    pub review_count: u32,
    /// 复习答对次数
    pub correct_count: u32,
    /// 来源视频 ID
    pub source_video_id: String,
}

impl VocabularyEntry {
    /// 创建新的生词本条目（状态为 new，计数清零）
    pub fn new(word_id: &str, source_video_id: &str) -> Self {
        Self {
            word_id: word_id.to_string(),
            status: WordStatus::New,
            added_at: Utc::now(),
            last_reviewed: None,
            review_count: 0,
            correct_count: 0,
            source_video_id: source_video_id.to_string(),
        }
    }

    /// 状态流转
    ///
    /// 更新掌握状态，记录复习时间并累加复习次数。
    pub fn transition(&mut self, status: WordStatus) {
        self.status = status;
        self.last_reviewed = Some(Utc::now());
        self.review_count += 1;
    }
}

// ============================================================
// StudyRecord - 学习记录
// ============================================================

/// 学习记录
///
/// 一次视频学习会话的追加式日志。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    /// 记录唯一标识 (UUID)
    pub id: String,
    /// 学习日期
    pub date: NaiveDate,
    /// 视频 ID
    pub video_id: String,
    /// 开始位置（秒）
    pub start_time: f64,
    /// 结束位置（秒）
    pub end_time: f64,
    /// 学习时长（秒）
    pub duration: f64,
    /// 本次学习的单词 ID 列表
    pub words_learned: Vec<String>,
    /// 备注
    pub notes: String,
}

impl StudyRecord {
    /// 创建新的学习记录，自动生成 ID 并以本地日期为学习日期
    pub fn new(video_id: &str, start_time: f64, end_time: f64, words_learned: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: Local::now().date_naive(),
            video_id: video_id.to_string(),
            start_time,
            end_time,
            duration: (end_time - start_time).max(0.0),
            words_learned,
            notes: String::new(),
        }
    }
}

// ============================================================
// CheckInRecord - 打卡记录
// ============================================================

/// 打卡记录
///
/// 每个自然日至多一条记录，以 `date` 为唯一键。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    /// 记录唯一标识 (UUID)
    pub id: String,
    /// 打卡日期（本地自然日）
    pub date: NaiveDate,
    /// 听力时长（分钟）
    pub listen_minutes: u32,
    /// 单词练习数量
    pub word_practice: u32,
    /// 完成的视频数量
    pub video_completed: u32,
    /// 复习的单词数量
    pub reviewed_words: u32,
    /// 是否完成打卡
    pub completed: bool,
}

impl CheckInRecord {
    /// 由草稿创建当日打卡记录，未提供的计数默认为 0
    pub fn from_draft(date: NaiveDate, draft: &CheckInDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            listen_minutes: draft.listen_minutes.unwrap_or(0),
            word_practice: draft.word_practice.unwrap_or(0),
            video_completed: draft.video_completed.unwrap_or(0),
            reviewed_words: draft.reviewed_words.unwrap_or(0),
            completed: true,
        }
    }

    /// 合并同日的补充打卡，未提供的字段保持不变
    pub fn merge(&mut self, draft: &CheckInDraft) {
        if let Some(v) = draft.listen_minutes {
            self.listen_minutes = v;
        }
        if let Some(v) = draft.word_practice {
            self.word_practice = v;
        }
        if let Some(v) = draft.video_completed {
            self.video_completed = v;
        }
        if let Some(v) = draft.reviewed_words {
            self.reviewed_words = v;
        }
        self.completed = true;
    }
}

/// 打卡草稿（部分计数字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInDraft {
    /// 听力时长（分钟）
    pub listen_minutes: Option<u32>,
    /// 单词练习数量
    pub word_practice: Option<u32>,
    /// 完成的视频数量
    pub video_completed: Option<u32>,
    /// 复习的单词数量
    pub reviewed_words: Option<u32>,
}

// ============================================================
// DailyTask - 每日任务
// ============================================================

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// 听力时长
    Listen,
    /// 单词练习
    Practice,
    /// 单词复习
    Review,
    /// 完成视频
    Video,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listen => "listen",
            Self::Practice => "practice",
            Self::Review => "review",
            Self::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "listen" => Some(Self::Listen),
            "practice" => Some(Self::Practice),
            "review" => Some(Self::Review),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// 每日任务
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    /// 任务标识（固定任务表中的 t1..t4）
    pub id: String,
    /// 任务类型
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// 目标量
    pub target: u32,
    /// 当前进度，不超过 target
    pub current: u32,
    /// 展示单位（如 "分钟"、"个"）
    pub unit: String,
    /// 是否完成
    pub completed: bool,
}

impl DailyTask {
    /// 创建进度为零的任务
    pub fn new(id: &str, task_type: TaskType, target: u32, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            task_type,
            target,
            current: 0,
            unit: unit.to_string(),
            completed: false,
        }
    }

    /// 累加进度，封顶于 target，同时重算完成状态
    pub fn apply_progress(&mut self, delta: u32) {
        self.current = (self.current + delta).min(self.target);
        self.completed = self.current >= self.target;
    }

    /// 强制完成
    pub fn force_complete(&mut self) {
        self.current = self.target;
        self.completed = true;
    }
}

// ============================================================
// Note - 学习笔记
// ============================================================

/// 学习笔记
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// 笔记唯一标识 (UUID)
    pub id: String,
    /// 用户 ID
    pub user_id: String,
    /// 所属视频 ID
    pub video_id: String,
    /// 关联句子 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_id: Option<String>,
    /// 笔记内容
    pub content: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 点赞数
    pub likes: u32,
}

impl Note {
    /// 由草稿创建笔记，自动生成 ID 与创建时间，点赞数清零
    pub fn new(draft: NoteDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: draft.user_id,
            video_id: draft.video_id,
            sentence_id: draft.sentence_id,
            content: draft.content,
            created_at: Utc::now(),
            likes: 0,
        }
    }
}

/// 笔记草稿（不含生成字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    /// 用户 ID
    pub user_id: String,
    /// 所属视频 ID
    pub video_id: String,
    /// 关联句子 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_id: Option<String>,
    /// 笔记内容
    pub content: String,
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_entry_new() {
        let entry = VocabularyEntry::new("word-1", "video-1");

        assert_eq!(entry.word_id, "word-1");
        assert_eq!(entry.status, WordStatus::New);
        assert_eq!(entry.review_count, 0);
        assert_eq!(entry.correct_count, 0);
        assert!(entry.last_reviewed.is_none());
        assert_eq!(entry.source_video_id, "video-1");
    }

    #[test]
    fn test_vocabulary_entry_transition() {
        let mut entry = VocabularyEntry::new("word-1", "video-1");

        entry.transition(WordStatus::Learning);
        assert_eq!(entry.status, WordStatus::Learning);
        assert_eq!(entry.review_count, 1);
        assert!(entry.last_reviewed.is_some());

        entry.transition(WordStatus::Mastered);
        assert_eq!(entry.status, WordStatus::Mastered);
        assert_eq!(entry.review_count, 2);
    }

    #[test]
    fn test_word_status_parse() {
        assert_eq!(WordStatus::parse("learning"), Some(WordStatus::Learning));
        assert_eq!(WordStatus::Mastered.as_str(), "mastered");
        assert_eq!(WordStatus::parse("unknown"), None);
    }

    #[test]
    fn test_check_in_record_from_draft_defaults() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("Invalid date");
        let draft = CheckInDraft {
            listen_minutes: Some(30),
            ..Default::default()
        };

        let record = CheckInRecord::from_draft(date, &draft);
        assert_eq!(record.listen_minutes, 30);
        assert_eq!(record.word_practice, 0);
        assert_eq!(record.video_completed, 0);
        assert_eq!(record.reviewed_words, 0);
        assert!(record.completed);
    }

    #[test]
    fn test_check_in_record_merge_keeps_missing_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("Invalid date");
        let mut record = CheckInRecord::from_draft(
            date,
            &CheckInDraft {
                listen_minutes: Some(30),
                ..Default::default()
            },
        );

        record.merge(&CheckInDraft {
            word_practice: Some(10),
            ..Default::default()
        });

        assert_eq!(record.listen_minutes, 30);
        assert_eq!(record.word_practice, 10);
    }

    #[test]
    fn test_daily_task_progress_clamped() {
        let mut task = DailyTask::new("t2", TaskType::Practice, 10, "个");

        task.apply_progress(7);
        assert_eq!(task.current, 7);
        assert!(!task.completed);

        task.apply_progress(7);
        assert_eq!(task.current, 10);
        assert!(task.completed);
    }

    #[test]
    fn test_note_new() {
        let note = Note::new(NoteDraft {
            user_id: "user-1".to_string(),
            video_id: "video-1".to_string(),
            sentence_id: None,
            content: "地道的表达".to_string(),
        });

        assert_eq!(note.likes, 0);
        assert!(!note.id.is_empty());
        assert_eq!(note.video_id, "video-1");
    }

    #[test]
    fn test_vocabulary_entry_serializes_camel_case() {
        let entry = VocabularyEntry::new("word-1", "video-1");
        let json = serde_json::to_string(&entry).expect("Failed to serialize");

        assert!(json.contains("\"wordId\""));
        assert!(json.contains("\"addedAt\""));
        assert!(json.contains("\"reviewCount\""));
        assert!(json.contains("\"sourceVideoId\""));
        assert!(json.contains("\"status\":\"new\""));
    }

    #[test]
    fn test_daily_task_type_field_name() {
        let task = DailyTask::new("t1", TaskType::Listen, 30, "分钟");
        let json = serde_json::to_string(&task).expect("Failed to serialize");

        assert!(json.contains("\"type\":\"listen\""));
    }
}

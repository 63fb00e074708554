//! 只读内容目录
//!
//! 提供视频、句子、单词与分类元信息的查询接口。目录数据由外部
//! 以 JSON 形式提供，核心只按标识查询，从不修改。

use serde::{Deserialize, Serialize};

// ============================================================
// 枚举类型
// ============================================================

/// 视频分类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCategory {
    #[default]
    Daily,
    Work,
    Travel,
    News,
    Academic,
    Movie,
}

impl VideoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Work => "work",
            Self::Travel => "travel",
            Self::News => "news",
            Self::Academic => "academic",
            Self::Movie => "movie",
        }
    }
}

/// 难度等级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Elementary => "elementary",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// 句子复杂度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceComplexity {
    #[default]
    Simple,
    Compound,
    Complex,
}

// ============================================================
// 目录记录
// ============================================================

/// 字幕句子
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// 句子 ID
    pub id: String,
    /// 所属视频 ID
    pub video_id: String,
    /// 起始时间（秒）
    pub start_time: f64,
    /// 结束时间（秒）
    pub end_time: f64,
    /// 英文字幕
    pub english: String,
    /// 中文字幕
    pub chinese: String,
    /// 句中重点单词 ID 列表
    pub words: Vec<String>,
}

/// 目录单词
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogWord {
    /// 单词 ID
    pub id: String,
    /// 单词拼写
    pub word: String,
    /// 音标
    pub phonetic: String,
    /// 词性
    pub part_of_speech: String,
    /// 英文释义
    pub definition: String,
    /// 中文释义
    pub translation: String,
    /// 例句
    pub example: String,
    /// 例句翻译
    pub example_translation: String,
}

/// 视频素材
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// 视频 ID
    pub id: String,
    /// 标题
    pub title: String,
    /// 简介
    pub description: String,
    /// 封面图 URL
    pub thumbnail: String,
    /// YouTube 视频 ID
    pub youtube_id: String,
    /// 分类
    pub category: VideoCategory,
    /// 难度等级
    pub level: DifficultyLevel,
    /// 重点词汇数量
    pub vocabulary_count: u32,
    /// 句子复杂度
    pub sentence_complexity: SentenceComplexity,
    /// 时长（秒）
    pub duration: u32,
    /// 字幕句子，按起始时间升序
    pub sentences: Vec<Sentence>,
    /// 重点词汇
    pub vocabulary: Vec<CatalogWord>,
    /// 标签
    pub tags: Vec<String>,
}

/// 分类展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: VideoCategory,
    /// 中文名称
    pub name: String,
    /// 英文名称
    pub name_en: String,
    /// 图标
    pub icon: String,
    /// 描述
    pub description: String,
}

/// 难度展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub id: DifficultyLevel,
    /// 中文名称
    pub name: String,
    /// 英文名称
    pub name_en: String,
    /// 词汇量范围
    pub vocabulary_range: String,
    /// 描述
    pub description: String,
    /// 展示颜色
    pub color: String,
}

// ============================================================
// Catalog - 目录查询接口
// ============================================================

/// 只读内容目录
///
/// 持有不可变的素材数据，提供按标识查询的接口。
pub struct Catalog {
    videos: Vec<Video>,
    categories: Vec<CategoryInfo>,
    levels: Vec<LevelInfo>,
}

impl Catalog {
    /// 以外部提供的素材数据构建目录
    pub fn new(videos: Vec<Video>, categories: Vec<CategoryInfo>, levels: Vec<LevelInfo>) -> Self {
        Self {
            videos,
            categories,
            levels,
        }
    }

    /// 按 ID 查询视频
    pub fn find_video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// 全部视频
    pub fn list_videos(&self) -> &[Video] {
        &self.videos
    }

    /// 按分类筛选视频
    pub fn videos_by_category(&self, category: VideoCategory) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|v| v.category == category)
            .collect()
    }

    /// 按 ID 或拼写查询单词
    ///
    /// 遍历全部视频的重点词汇表，拼写匹配不区分大小写。
    pub fn find_word(&self, key: &str) -> Option<&CatalogWord> {
        self.videos.iter().flat_map(|v| v.vocabulary.iter()).find(
            |w| w.id == key || w.word.eq_ignore_ascii_case(key),
        )
    }

    /// 按分类 ID 查询展示信息
    pub fn category_info(&self, id: VideoCategory) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// 按难度 ID 查询展示信息
    pub fn level_info(&self, id: DifficultyLevel) -> Option<&LevelInfo> {
        self.levels.iter().find(|l| l.id == id)
    }
}

// ============================================================
// 测试
// ============================================================

//! 播放器瞬时状态
//!
//! 持有当前选中的视频与播放进度，并负责字幕句子与播放时间的
//! 同步。该状态的生命周期仅限当前会话，不做任何持久化。

use serde::{Deserialize, Serialize};

use crate::catalog::{Sentence, Video};

// ============================================================
// SubtitleMode - 字幕模式
// ============================================================

/// 字幕显示模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleMode {
    /// 中英双语
    #[default]
    Bilingual,
    /// 仅中文
    Chinese,
    /// 仅英文
    English,
    /// 隐藏字幕
    None,
}

// ============================================================
// 字幕同步
// ============================================================

/// 定位播放时间所在的句子下标
///
/// 取起始时间不大于 `time` 的最后一个句子；最后一个句子的上界
/// 视为无穷大。`time` 早于首句或句子列表为空时返回 0。
pub fn active_sentence_index(sentences: &[Sentence], time: f64) -> usize {
    let mut index = 0;
    for (i, sentence) in sentences.iter().enumerate() {
        if sentence.start_time <= time {
            index = i;
        } else {
            break;
        }
    }
    index
}

// ============================================================
// PlayerTracker - 播放器状态
// ============================================================

/// 播放器瞬时状态
#[derive(Debug, Clone)]
pub struct PlayerTracker {
    current_video: Option<Video>,
    current_time: f64,
    playback_rate: f64,
    is_playing: bool,
    subtitle_mode: SubtitleMode,
    current_sentence_index: usize,
    loop_sentence: bool,
    volume: f64,
}

impl Default for PlayerTracker {
    fn default() -> Self {
        Self {
            current_video: None,
            current_time: 0.0,
            playback_rate: 1.0,
            is_playing: false,
            subtitle_mode: SubtitleMode::Bilingual,
            current_sentence_index: 0,
            loop_sentence: false,
            volume: 1.0,
        }
    }
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换当前视频
    ///
    /// 进度与句子下标归零，播放停止。传入 `None` 表示清空选择。
    pub fn select_video(&mut self, video: Option<Video>) {
        self.current_video = video;
        self.current_time = 0.0;
        self.current_sentence_index = 0;
        self.is_playing = false;
    }

    /// 更新播放进度并重新定位当前句子
    pub fn advance_to(&mut self, time: f64) {
        self.current_time = time;
        if let Some(video) = &self.current_video {
            self.current_sentence_index = active_sentence_index(&video.sentences, time);
        }
    }

    /// 跳转到指定句子并开始播放
    ///
    /// 未选中视频或下标越界时静默返回。
    pub fn jump_to_sentence(&mut self, index: usize) {
        let Some(video) = &self.current_video else {
            return;
        };
        let Some(sentence) = video.sentences.get(index) else {
            return;
        };

        self.current_sentence_index = index;
        self.current_time = sentence.start_time;
        self.is_playing = true;
    }

    /// 切换播放/暂停
    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// 设置倍速
    pub fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    /// 设置字幕模式
    pub fn set_subtitle_mode(&mut self, mode: SubtitleMode) {
        self.subtitle_mode = mode;
    }

    /// 切换单句循环
    pub fn toggle_loop_sentence(&mut self) {
        self.loop_sentence = !self.loop_sentence;
    }

    /// 设置音量，取值范围 [0, 1]，越界自动截断
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    // ========== 查询 ==========

    pub fn current_video(&self) -> Option<&Video> {
        self.current_video.as_ref()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn subtitle_mode(&self) -> SubtitleMode {
        self.subtitle_mode
    }

    pub fn current_sentence_index(&self) -> usize {
        self.current_sentence_index
    }

    /// 当前句子
    pub fn current_sentence(&self) -> Option<&Sentence> {
        self.current_video
            .as_ref()
            .and_then(|v| v.sentences.get(self.current_sentence_index))
    }

    pub fn loop_sentence(&self) -> bool {
        self.loop_sentence
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(id: &str, start_time: f64, end_time: f64) -> Sentence {
        Sentence {
            id: id.to_string(),
            video_id: "video-1".to_string(),
            start_time,
            end_time,
            english: String::new(),
            chinese: String::new(),
            words: Vec::new(),
        }
    }

    fn sample_video() -> Video {
        Video {
            id: "video-1".to_string(),
            sentences: vec![
                sentence("s1", 0.0, 5.0),
                sentence("s2", 5.0, 12.0),
                sentence("s3", 12.0, 20.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_active_sentence_index_boundaries() {
        let sentences = vec![
            sentence("s1", 0.0, 5.0),
            sentence("s2", 5.0, 12.0),
            sentence("s3", 12.0, 20.0),
        ];

        assert_eq!(active_sentence_index(&sentences, 0.0), 0);
        assert_eq!(active_sentence_index(&sentences, 4.9), 0);
        assert_eq!(active_sentence_index(&sentences, 7.0), 1);
        assert_eq!(active_sentence_index(&sentences, 12.0), 2);
        // 末句上界无穷大
        assert_eq!(active_sentence_index(&sentences, 100.0), 2);
        // 空列表
        assert_eq!(active_sentence_index(&[], 7.0), 0);
    }

    #[test]
    fn test_select_video_resets_transient_state() {
        let mut player = PlayerTracker::new();
        player.select_video(Some(sample_video()));
        player.advance_to(13.0);
        player.toggle_play();
        assert!(player.is_playing());

        player.select_video(Some(sample_video()));

        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.current_sentence_index(), 0);
        assert!(!player.is_playing());

        player.select_video(None);
        assert!(player.current_video().is_none());
    }

    #[test]
    fn test_advance_to_syncs_sentence_index() {
        let mut player = PlayerTracker::new();
        player.select_video(Some(sample_video()));

        player.advance_to(7.0);
        assert_eq!(player.current_sentence_index(), 1);
        assert_eq!(
            player.current_sentence().expect("Sentence not found").id,
            "s2"
        );

        player.advance_to(100.0);
        assert_eq!(player.current_sentence_index(), 2);
    }

    #[test]
    fn test_jump_to_sentence_starts_playback() {
        let mut player = PlayerTracker::new();
        player.select_video(Some(sample_video()));

        player.jump_to_sentence(2);

        assert_eq!(player.current_sentence_index(), 2);
        assert_eq!(player.current_time(), 12.0);
        assert!(player.is_playing());
    }

    #[test]
    fn test_jump_to_sentence_out_of_range_is_noop() {
        let mut player = PlayerTracker::new();
        player.select_video(Some(sample_video()));

        player.jump_to_sentence(99);
        assert_eq!(player.current_sentence_index(), 0);
        assert!(!player.is_playing());

        // 未选中视频同样是空操作
        let mut empty = PlayerTracker::new();
        empty.jump_to_sentence(0);
        assert!(!empty.is_playing());
    }

    #[test]
    fn test_set_volume_clamps() {
        let mut player = PlayerTracker::new();

        player.set_volume(0.5);
        assert_eq!(player.volume(), 0.5);
        player.set_volume(1.5);
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-0.2);
        assert_eq!(player.volume(), 0.0);
    }

    #[test]
    fn test_toggles_and_modes() {
        let mut player = PlayerTracker::new();
        assert_eq!(player.subtitle_mode(), SubtitleMode::Bilingual);

        player.set_subtitle_mode(SubtitleMode::English);
        assert_eq!(player.subtitle_mode(), SubtitleMode::English);

        player.toggle_loop_sentence();
        assert!(player.loop_sentence());
        player.toggle_loop_sentence();
        assert!(!player.loop_sentence());

        player.set_playback_rate(0.75);
        assert_eq!(player.playback_rate(), 0.75);
    }
}

// TTS (Text-to-Speech) 平台模块
// 提供单词与句子的发音能力
//
// macOS: 调用系统 `say` 命令
// Linux: 调用 `espeak` 命令
// 其余平台: 返回不支持，由上层界面使用自己的语音方案

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TTS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// 语言代码 (如 "en-US", "zh-CN")
    pub language: String,
    /// 语速 (0.5 - 2.0, 1.0 为正常)
    pub rate: f32,
    /// 音调 (0.5 - 2.0, 1.0 为正常)
    pub pitch: f32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            rate: 0.9, // 稍慢一点，便于学习
            pitch: 1.0,
        }
    }
}

/// TTS 错误类型
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("TTS 不支持当前平台")]
    NotSupported,

    #[error("TTS 播放失败: {0}")]
    SpeakFailed(String),
}

/// 基准语速（每分钟单词数）
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

fn words_per_minute(config: &TtsConfig) -> i32 {
    (BASE_WORDS_PER_MINUTE * config.rate) as i32
}

// ============================================
// macOS 平台实现
// ============================================

#[cfg(target_os = "macos")]
mod imp {
    use super::*;
    use std::process::Command;

    pub fn speak(text: &str, config: &TtsConfig) -> Result<(), TtsError> {
        Command::new("say")
            .arg("-r")
            .arg(words_per_minute(config).to_string())
            .arg(text)
            .spawn()
            .map_err(|e| TtsError::SpeakFailed(e.to_string()))?;
        Ok(())
    }

    pub fn is_supported() -> bool {
        true
    }
}

// ============================================
// Linux 平台实现
// ============================================

#[cfg(target_os = "linux")]
mod imp {
    use super::*;
    use std::process::Command;

    pub fn speak(text: &str, config: &TtsConfig) -> Result<(), TtsError> {
        Command::new("espeak")
            .arg("-v")
            .arg(config.language.to_lowercase())
            .arg("-s")
            .arg(words_per_minute(config).to_string())
            .arg(text)
            .spawn()
            .map_err(|e| TtsError::SpeakFailed(e.to_string()))?;
        Ok(())
    }

    pub fn is_supported() -> bool {
        true
    }
}

// ============================================
// 其余平台
// ============================================

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
mod imp {
    use super::*;

    pub fn speak(_text: &str, _config: &TtsConfig) -> Result<(), TtsError> {
        Err(TtsError::NotSupported)
    }

    pub fn is_supported() -> bool {
        false
    }
}

// ============================================
// 统一接口
// ============================================

/// 播放文本
///
/// 只负责启动发音进程，不等待播放完成。
pub fn speak(text: &str, config: Option<TtsConfig>) -> Result<(), TtsError> {
    let config = config.unwrap_or_default();
    imp::speak(text, &config)
}

/// 尽力而为的发音
///
/// 播放失败只记录日志，调用方观察不到任何错误。
pub fn pronounce(text: &str) {
    if let Err(err) = speak(text, None) {
        log::debug!("发音失败（忽略）: {err}");
    }
}

/// 当前平台是否支持发音
pub fn is_supported() -> bool {
    imp::is_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TtsConfig::default();
        assert_eq!(config.language, "en-US");
        assert!(config.rate > 0.0);
        assert!(config.pitch > 0.0);
    }

    #[test]
    fn test_words_per_minute_scales_with_rate() {
        let config = TtsConfig {
            rate: 1.0,
            ..Default::default()
        };
        assert_eq!(words_per_minute(&config), 175);

        let slower = TtsConfig {
            rate: 0.8,
            ..Default::default()
        };
        assert!(words_per_minute(&slower) < 175);
    }

    #[test]
    fn test_tts_error_display() {
        let err = TtsError::NotSupported;
        assert!(err.to_string().contains("不支持"));
    }

    #[test]
    fn test_pronounce_never_panics() {
        // 发音是尽力而为的，即使后端不可用也不会失败
        pronounce("hello");
    }
}

// Platform 模块 - 平台特定功能
// 目前只包含发音 (TTS) 能力

pub mod tts;

pub use tts::{pronounce, TtsConfig, TtsError};

/// 获取当前平台名称
pub fn get_platform() -> &'static str {
    #[cfg(target_os = "windows")]
    return "windows";

    #[cfg(target_os = "macos")]
    return "macos";

    #[cfg(target_os = "linux")]
    return "linux";

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    return "unknown";
}

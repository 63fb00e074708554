//! 本地持久化存储模块
//!
//! 提供学习状态的本地持久化功能，支持：
//! - 生词本与学习记录的整体快照持久化
//! - 打卡记录与连续打卡统计
//! - 每日任务进度
//! - 学习笔记
//!
//! 每个仓储将自己的完整状态序列化为一个 JSON blob，写入以作用域名
//! 命名的存储位置。作用域名与字段命名沿用前端持久化层的约定。

// ============================================================
// 子模块声明
// ============================================================

pub mod checkin;
pub mod learning;
pub mod models;
pub mod notes;
pub mod tasks;

// ============================================================
// 重新导出主要类型
// ============================================================

pub use checkin::CheckInLedger;
pub use learning::LearningLedger;
pub use models::*;
pub use notes::NoteLedger;
pub use tasks::TaskLedger;

// ============================================================
// 依赖导入
// ============================================================

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

// ============================================================
// 错误类型定义
// ============================================================

/// 存储模块错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("读写持久化文件失败: {0}")]
    Io(#[from] io::Error),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("锁获取失败: {0}")]
    LockError(String),

    #[error("无法确定数据目录")]
    DataDirUnavailable,
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// 作用域常量
// ============================================================

/// 生词本与学习记录作用域
pub const LEARNING_SCOPE: &str = "learning-storage";
/// 打卡记录作用域
pub const CHECKIN_SCOPE: &str = "checkin-storage";
/// 学习笔记作用域
pub const NOTE_SCOPE: &str = "note-storage";
/// 每日任务作用域
pub const TASK_SCOPE: &str = "task-storage";

// ============================================================
// ScopeStore - 持久化接口
// ============================================================

/// 按作用域读写 JSON blob 的持久化接口
///
/// 每个作用域对应一个完整的状态快照。实现方只负责字节的存取，
/// 序列化与反序列化由各仓储完成，便于替换存储介质（文件、内存、
/// 嵌入式 KV 等）而不触碰仓储逻辑。
pub trait ScopeStore: Send + Sync {
    /// 读取指定作用域的 blob，不存在时返回 None
    fn load(&self, scope: &str) -> StorageResult<Option<String>>;

    /// 写入指定作用域的 blob（整体覆盖）
    fn save(&self, scope: &str, blob: &str) -> StorageResult<()>;
}

// ============================================================
// FileStore - 文件存储实现
// ============================================================

/// 文件存储实现
///
/// 在数据目录下以 `<scope>.json` 的形式保存每个作用域的状态快照。
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 创建新的文件存储
    ///
    /// # Arguments
    /// * `dir` - 数据目录，首次写入时自动创建
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 平台默认数据目录 (`<data_dir>/tingli`)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("tingli"))
    }

    /// 使用平台默认数据目录创建文件存储
    pub fn open_default() -> StorageResult<Self> {
        Self::default_dir()
            .map(Self::new)
            .ok_or(StorageError::DataDirUnavailable)
    }

    /// 获取数据目录
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, scope: &str) -> PathBuf {
        self.dir.join(format!("{scope}.json"))
    }
}

impl ScopeStore for FileStore {
    fn load(&self, scope: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(scope)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, scope: &str, blob: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(scope), blob)?;
        Ok(())
    }
}

// ============================================================
// MemoryStore - 内存存储实现（用于测试）
// ============================================================

/// 内存存储实现
///
/// 状态只保存在进程内，进程退出后丢失，主要用于测试。
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScopeStore for MemoryStore {
    fn load(&self, scope: &str) -> StorageResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))?;
        Ok(blobs.get(scope).cloned())
    }

    fn save(&self, scope: &str, blob: &str) -> StorageResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))?;
        blobs.insert(scope.to_string(), blob.to_string());
        Ok(())
    }
}

// ============================================================
// 作用域状态读写辅助
// ============================================================

/// 读取并反序列化作用域状态
///
/// blob 缺失、损坏或不可读时回退为空初始状态，绝不向上传播
/// 致命错误。损坏的数据会记录一条警告日志。
pub(crate) fn load_scope_state<T>(store: &dyn ScopeStore, scope: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(scope) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("{scope} 持久化数据损坏，回退为空状态: {err}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("读取 {scope} 失败，回退为空状态: {err}");
            T::default()
        }
    }
}

/// 序列化并写入作用域状态（整体覆盖）
pub(crate) fn save_scope_state<T>(
    store: &dyn ScopeStore,
    scope: &str,
    state: &T,
) -> StorageResult<()>
where
    T: Serialize,
{
    let blob = serde_json::to_string(state)?;
    store.save(scope, &blob)
}

// ============================================================
// Storage - 统一存储结构体
// ============================================================

/// 统一存储结构体
///
/// 持有一个共享的 [`ScopeStore`]，提供对各仓储的便捷访问。
/// 每个仓储在创建时读取自己作用域的快照（惰性加载），之后的
/// 每次变更都会整体回写。
pub struct Storage {
    store: Arc<dyn ScopeStore>,
}

impl Storage {
    /// 使用指定的持久化实现创建 Storage
    pub fn new(store: Arc<dyn ScopeStore>) -> Self {
        Self { store }
    }

    /// 使用指定数据目录下的文件存储创建 Storage
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::new(Arc::new(FileStore::new(data_dir)))
    }

    /// 使用平台默认数据目录创建 Storage
    pub fn open_default() -> StorageResult<Self> {
        Ok(Self::new(Arc::new(FileStore::open_default()?)))
    }

    /// 创建内存存储（用于测试）
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// 获取底层持久化实现
    pub fn store(&self) -> Arc<dyn ScopeStore> {
        Arc::clone(&self.store)
    }

    /// 获取生词本与学习记录仓储
    pub fn learning(&self) -> LearningLedger {
        LearningLedger::load(Arc::clone(&self.store))
    }

    /// 获取打卡记录仓储
    pub fn check_ins(&self) -> CheckInLedger {
        CheckInLedger::load(Arc::clone(&self.store))
    }

    /// 获取每日任务仓储
    pub fn tasks(&self) -> TaskLedger {
        TaskLedger::load(Arc::clone(&self.store))
    }

    /// 获取学习笔记仓储
    pub fn notes(&self) -> NoteLedger {
        NoteLedger::load(Arc::clone(&self.store))
    }
}

// ============================================================
// 测试
// ============================================================

//! 学习笔记仓储
//!
//! 管理 `note-storage` 作用域：按视频维度的笔记，只支持追加、
//! 删除与点赞。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::models::{Note, NoteDraft};
use crate::storage::{load_scope_state, save_scope_state, ScopeStore, StorageResult, NOTE_SCOPE};

/// `note-storage` 作用域的完整状态快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteState {
    pub notes: Vec<Note>,
}

/// 学习笔记仓储
pub struct NoteLedger {
    state: NoteState,
    store: Arc<dyn ScopeStore>,
}

impl NoteLedger {
    /// 从持久化存储加载仓储
    pub fn load(store: Arc<dyn ScopeStore>) -> Self {
        let state = load_scope_state(store.as_ref(), NOTE_SCOPE);
        Self { state, store }
    }

    fn persist(&self) -> StorageResult<()> {
        save_scope_state(self.store.as_ref(), NOTE_SCOPE, &self.state)
    }

    /// 追加笔记，返回生成的笔记 ID
    pub fn add(&mut self, draft: NoteDraft) -> StorageResult<String> {
        let note = Note::new(draft);
        let id = note.id.clone();
        self.state.notes.push(note);
        self.persist()?;
        Ok(id)
    }

    /// 删除笔记，不存在时静默返回
    pub fn remove(&mut self, note_id: &str) -> StorageResult<()> {
        let before = self.state.notes.len();
        self.state.notes.retain(|n| n.id != note_id);

        if self.state.notes.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// 点赞，不存在时静默返回
    pub fn like(&mut self, note_id: &str) -> StorageResult<()> {
        let mut changed = false;
        if let Some(note) = self.state.notes.iter_mut().find(|n| n.id == note_id) {
            note.likes += 1;
            changed = true;
        }

        if !changed {
            return Ok(());
        }
        self.persist()
    }

    /// 按视频筛选笔记
    pub fn by_video(&self, video_id: &str) -> Vec<&Note> {
        self.state
            .notes
            .iter()
            .filter(|n| n.video_id == video_id)
            .collect()
    }

    /// 按用户筛选笔记
    pub fn by_user(&self, user_id: &str) -> Vec<&Note> {
        self.state
            .notes
            .iter()
            .filter(|n| n.user_id == user_id)
            .collect()
    }

    /// 全部笔记
    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn setup_ledger() -> NoteLedger {
        NoteLedger::load(Arc::new(MemoryStore::new()))
    }

    fn draft(user_id: &str, video_id: &str, content: &str) -> NoteDraft {
        NoteDraft {
            user_id: user_id.to_string(),
            video_id: video_id.to_string(),
            sentence_id: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_add_assigns_id_and_zero_likes() {
        let mut ledger = setup_ledger();

        let id = ledger
            .add(draft("user-1", "video-1", "这个短语很常用"))
            .expect("Failed to add note");

        assert_eq!(ledger.notes().len(), 1);
        let note = &ledger.notes()[0];
        assert_eq!(note.id, id);
        assert_eq!(note.likes, 0);
        assert_eq!(note.content, "这个短语很常用");
    }

    #[test]
    fn test_remove_filters_note_out() {
        let mut ledger = setup_ledger();
        let id = ledger
            .add(draft("user-1", "video-1", "a"))
            .expect("Failed to add note");
        ledger
            .add(draft("user-1", "video-2", "b"))
            .expect("Failed to add note");

        ledger.remove(&id).expect("Failed to remove");
        assert_eq!(ledger.notes().len(), 1);

        // 再删一次是空操作
        ledger.remove(&id).expect("Failed to remove");
        assert_eq!(ledger.notes().len(), 1);
    }

    #[test]
    fn test_like_increments_and_absent_is_noop() {
        let mut ledger = setup_ledger();
        let id = ledger
            .add(draft("user-1", "video-1", "a"))
            .expect("Failed to add note");

        ledger.like(&id).expect("Failed to like");
        ledger.like(&id).expect("Failed to like");
        assert_eq!(ledger.notes()[0].likes, 2);

        ledger.like("note-404").expect("Failed to like");
        assert_eq!(ledger.notes()[0].likes, 2);
    }

    #[test]
    fn test_filters_by_video_and_user() {
        let mut ledger = setup_ledger();
        ledger
            .add(draft("user-1", "video-1", "a"))
            .expect("Failed to add note");
        ledger
            .add(draft("user-2", "video-1", "b"))
            .expect("Failed to add note");
        ledger
            .add(draft("user-1", "video-2", "c"))
            .expect("Failed to add note");

        assert_eq!(ledger.by_video("video-1").len(), 2);
        assert_eq!(ledger.by_user("user-1").len(), 2);
        assert_eq!(ledger.by_video("video-3").len(), 0);
    }

    #[test]
    fn test_state_survives_reload() {
        let store = Arc::new(MemoryStore::new());

        let id = {
            let mut ledger = NoteLedger::load(store.clone());
            let id = ledger
                .add(draft("user-1", "video-1", "a"))
                .expect("Failed to add note");
            ledger.like(&id).expect("Failed to like");
            id
        };

        let ledger = NoteLedger::load(store);
        assert_eq!(ledger.notes().len(), 1);
        assert_eq!(ledger.notes()[0].id, id);
        assert_eq!(ledger.notes()[0].likes, 1);
    }
}

use crate::game::state::Snapshot;

/// 历史记录
///
/// 每次修改前压入快照，撤销时弹出；只允许压入与弹出
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// 弹出最近的快照，为空时返回 `None`
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

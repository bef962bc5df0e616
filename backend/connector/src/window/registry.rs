use protocol::WindowId;

/// Ids of windows created in this session, in creation order.
///
/// Entries are never removed. The server does not reuse ids within a session,
/// so a destroyed window's id staying here only keeps it from being accepted
/// twice by the creation loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WindowRegistry {
    ids: Vec<WindowId>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.ids.contains(&window_id)
    }

    /// Returns false if the id was already present or is undefined.
    pub fn insert(&mut self, window_id: WindowId) -> bool {
        if !window_id.is_defined() || self.contains(window_id) {
            return false;
        }
        self.ids.push(window_id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[WindowId] {
        &self.ids
    }
}

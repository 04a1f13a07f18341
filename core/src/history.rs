pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded linear undo/redo ring over serialized snapshots. Writing after an
/// undo discards the forward entries; there is no redo tree.
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<String>,
    pointer: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: Vec::new(),
            pointer: None,
            capacity: capacity.max(1),
        }
    }

    /// Record a snapshot. Empty values and values equal to the entry at the
    /// pointer are dropped.
    pub fn snapshot(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(p) = self.pointer {
            if self.stack[p] == value {
                return;
            }
            self.stack.truncate(p + 1);
        } else {
            self.stack.clear();
        }
        self.stack.push(value.to_string());
        if self.stack.len() > self.capacity {
            self.stack.remove(0);
        }
        self.pointer = Some(self.stack.len() - 1);
    }

    pub fn undo(&mut self) -> Option<&str> {
        let p = self.pointer?;
        if p == 0 {
            return None;
        }
        self.pointer = Some(p - 1);
        Some(&self.stack[p - 1])
    }

    pub fn redo(&mut self) -> Option<&str> {
        let p = self.pointer?;
        if p + 1 >= self.stack.len() {
            return None;
        }
        self.pointer = Some(p + 1);
        Some(&self.stack[p + 1])
    }

    pub fn entries(&self) -> &[String] {
        &self.stack
    }

    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of identifiers for stub tool results.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self, prefix: &str) -> String {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        format!("{}{}", prefix, &raw[..8])
    }
}

/// Deterministic ids (`<prefix>1`, `<prefix>2`, ...), used by tests.
#[derive(Debug)]
pub struct SequentialIds {
    sequence: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("{}{}", prefix, n)
    }
}

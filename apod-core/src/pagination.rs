use tracing::debug;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub items: Vec<Record>,
    pub has_more: bool,
}

/// Reveals a filtered view in fixed-size batches.
#[derive(Debug, Clone)]
pub struct Paginator {
    view: Vec<Record>,
    cursor: usize,
    batch_size: usize,
}

impl Paginator {
    pub fn new(batch_size: usize) -> Self {
        Self {
            view: Vec::new(),
            cursor: 0,
            batch_size: batch_size.max(1),
        }
    }

    pub fn reset(&mut self, view: Vec<Record>) {
        self.view = view;
        self.cursor = 0;
    }

    pub fn next_batch(&mut self) -> Batch {
        let end = (self.cursor + self.batch_size).min(self.view.len());
        let items = self.view[self.cursor..end].to_vec();
        self.cursor = end;
        debug!(revealed = self.cursor, total = self.view.len(), "batch revealed");
        Batch {
            items,
            has_more: self.has_more(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.view.len()
    }

    pub fn revealed(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.view.len() - self.cursor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

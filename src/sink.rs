use crate::structs::PackedItem;

/// Collects placements in the order the engine commits them.
#[derive(Debug, Clone, Default)]
pub struct PackedItemSink {
    items: Vec<PackedItem>,
}

impl PackedItemSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: PackedItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PackedItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PackedItem> {
        self.items
    }
}

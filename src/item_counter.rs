use crate::item::Item;

/// Dense per-item counter indexed by item id.
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }
    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }
    pub fn get(&self, item: &Item) -> u32 {
        self.counter.get(item.as_index()).cloned().unwrap_or(0)
    }
    // Index 0 is the null item and is never reported.
    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<Item> {
        let mut v: Vec<Item> = vec![];
        for i in 1..self.counter.len() {
            if self.counter[i] >= min_count && self.counter[i] > 0 {
                v.push(Item::with_id(i as u32));
            }
        }
        v
    }
    /// Most frequent first. Equal counts fall back to ascending item order,
    /// which is canonical token order, so tree shapes are reproducible.
    pub fn sort_descending(&self, v: &mut Vec<Item>) {
        v.sort_by(|a, b| {
            let count_a = self.get(a);
            let count_b = self.get(b);
            count_b.cmp(&count_a).then_with(|| a.cmp(b))
        });
    }
}

impl Default for ItemCounter {
    fn default() -> ItemCounter {
        ItemCounter::new()
    }
}

use crate::itemizer::Itemizer;

/// An interned item token. Ids are handed out by the `Itemizer` in canonical
/// token order, so ordering `Item`s orders their tokens. Id 0 is the "no item"
/// sentinel carried by FP-tree roots.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn null() -> Item {
        Item { id: 0 }
    }
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn as_index(&self) -> usize {
        self.id as usize
    }
    pub fn is_null(&self) -> bool {
        self.id == 0
    }
    pub fn item_vec_to_string(items: &[Item], itemizer: &Itemizer) -> String {
        let a: Vec<&str> = items.iter().map(|&id| itemizer.str_of(id)).collect();
        a.join(" ")
    }
    pub fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(Item::id).collect()
    }
}

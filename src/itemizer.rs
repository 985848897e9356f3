use crate::item::Item;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp::Ordering;

/// Maps item tokens to `Item` ids and back.
///
/// Ids are assigned in canonical token order: numerically if every token is
/// an unsigned integer, lexicographically otherwise. Comparing two `Item`s is
/// therefore the same as comparing their tokens, which is what lets sorted
/// id vectors serve as canonical itemsets and as the FP-tree tie-break.
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn from_tokens<I, S>(tokens: I) -> Itemizer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut distinct: Vec<String> = tokens
            .into_iter()
            .map(|s| String::from(s.as_ref()))
            .unique()
            .collect();
        ensure_sorted(&mut distinct);

        let mut item_str_to_id = FnvHashMap::default();
        for (index, token) in distinct.iter().enumerate() {
            item_str_to_id.insert(token.clone(), Item::with_id((index + 1) as u32));
        }
        Itemizer {
            item_str_to_id,
            item_id_to_str: distinct,
        }
    }

    pub fn id_of(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }

    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index() - 1]
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }

    /// Looks up every token; `None` if any of them is unknown.
    pub fn to_id_vec(&self, items: &[&str]) -> Option<Vec<Item>> {
        items.iter().map(|s| self.id_of(s)).collect()
    }
}

// If all items convert to an integer, order by that integer,
// otherwise order lexicographically.
fn ensure_sorted(a: &mut Vec<String>) {
    let all_items_convert_to_ints = a.iter().all(|x| x.parse::<u64>().is_ok());
    if all_items_convert_to_ints {
        a.sort_by(|x, y| match (x.parse::<u64>(), y.parse::<u64>()) {
            // "07" and "7" parse equal; fall back to the text to keep the order total.
            (Ok(i), Ok(j)) => i.cmp(&j).then_with(|| x.cmp(y)),
            _ => Ordering::Equal,
        });
    } else {
        a.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;

    #[test]
    fn test_lexicographic_ids() {
        let itemizer = Itemizer::from_tokens(vec!["milk", "bread", "egg", "bread"]);
        assert_eq!(itemizer.len(), 3);
        let bread = itemizer.id_of("bread").unwrap();
        let egg = itemizer.id_of("egg").unwrap();
        let milk = itemizer.id_of("milk").unwrap();
        assert!(bread < egg && egg < milk);
        assert_eq!(itemizer.str_of(egg), "egg");
        assert!(itemizer.id_of("beer").is_none());
    }

    #[test]
    fn test_numeric_ids() {
        let itemizer = Itemizer::from_tokens(vec!["10", "9", "100", "1"]);
        let ids = itemizer.to_id_vec(&["1", "9", "10", "100"]).unwrap();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(itemizer.str_of(ids[2]), "10");
    }

    #[test]
    fn test_mixed_tokens_sort_lexicographically() {
        let itemizer = Itemizer::from_tokens(vec!["10", "9", "a"]);
        assert!(itemizer.id_of("10").unwrap() < itemizer.id_of("9").unwrap());
        assert!(itemizer.id_of("9").unwrap() < itemizer.id_of("a").unwrap());
    }
}

use crate::error::{MiningError, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::vec_sets::{contains_all, intersection, union};
use itertools::Itertools;

/// A set of distinct items in canonical form: ids strictly increasing.
///
/// Two itemsets built from the same items in any order compare and hash
/// equal, so `Itemset` is the key of every support table in the crate.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Itemset {
    items: Vec<Item>,
}

/// Sorts and de-duplicates `items`, then checks the result has exactly
/// `expected_len` items.
pub fn canonicalize<I>(items: I, expected_len: usize) -> Result<Itemset>
where
    I: IntoIterator<Item = Item>,
{
    let items: Vec<Item> = items.into_iter().sorted().dedup().collect();
    if items.len() != expected_len {
        return Err(MiningError::Canonicalization {
            items: Item::ids(&items),
            expected: expected_len,
        });
    }
    Ok(Itemset { items })
}

impl Itemset {
    /// Wraps an already sorted vector, verifying it is strictly increasing
    /// and `expected_len` long. No re-sorting happens here; a vector out of
    /// order is a bug in whoever built it.
    pub fn from_sorted(items: Vec<Item>, expected_len: usize) -> Result<Itemset> {
        let strictly_increasing = items.windows(2).all(|w| w[0] < w[1]);
        if !strictly_increasing || items.len() != expected_len {
            return Err(MiningError::Canonicalization {
                items: Item::ids(&items),
                expected: expected_len,
            });
        }
        Ok(Itemset { items })
    }

    pub fn singleton(item: Item) -> Itemset {
        Itemset { items: vec![item] }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> Vec<u32> {
        Item::ids(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if `transaction` (sorted) holds every item of this set.
    pub fn is_subset_of(&self, transaction: &[Item]) -> bool {
        contains_all(transaction, &self.items)
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        Itemset {
            items: union(&self.items, &other.items),
        }
    }

    pub fn intersection(&self, other: &Itemset) -> Itemset {
        Itemset {
            items: intersection(&self.items, &other.items),
        }
    }

    pub fn without(&self, item: Item) -> Itemset {
        Itemset {
            items: self.items.iter().cloned().filter(|&x| x != item).collect(),
        }
    }

    /// All subsets with one item removed, in item order.
    pub fn subsets_one_smaller(&self) -> impl Iterator<Item = Itemset> + '_ {
        self.items.iter().map(move |&item| self.without(item))
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        Item::item_vec_to_string(&self.items, itemizer)
    }
}

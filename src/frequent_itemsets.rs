use crate::error::{MiningError, Result};
use crate::itemset::Itemset;
use fnv::FnvHashMap;

pub type Level = FnvHashMap<Itemset, u32>;

/// Frequent itemsets with their support counts, grouped by itemset size.
///
/// `level(k)` holds the k-itemsets. Both miners produce this table and the
/// rule generator consumes it, so it also remembers the transaction count
/// and the absolute support threshold it was mined with.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequentItemsets {
    levels: Vec<Level>,
    num_transactions: usize,
    min_count: u32,
}

impl FrequentItemsets {
    pub fn new(num_transactions: usize, min_count: u32) -> FrequentItemsets {
        FrequentItemsets {
            levels: vec![],
            num_transactions,
            min_count,
        }
    }

    /// Records one itemset. Each itemset may be recorded once only.
    pub fn insert(&mut self, itemset: Itemset, support: u32) -> Result<()> {
        let size = itemset.len();
        if size == 0 {
            return Err(MiningError::LevelMismatch {
                items: vec![],
                len: 0,
                level: 0,
            });
        }
        while self.levels.len() < size {
            self.levels.push(Level::default());
        }
        let level = &mut self.levels[size - 1];
        if level.contains_key(&itemset) {
            return Err(MiningError::DuplicateItemset {
                items: itemset.ids(),
            });
        }
        level.insert(itemset, support);
        Ok(())
    }

    /// Appends a whole level; it must be the next size up and every itemset
    /// in it must have that size.
    pub fn push_level(&mut self, level: Level) -> Result<()> {
        let k = self.levels.len() + 1;
        if let Some(itemset) = level.keys().find(|itemset| itemset.len() != k) {
            return Err(MiningError::LevelMismatch {
                items: itemset.ids(),
                len: itemset.len(),
                level: k,
            });
        }
        self.levels.push(level);
        Ok(())
    }

    pub fn level(&self, k: usize) -> Option<&Level> {
        if k == 0 {
            return None;
        }
        self.levels.get(k - 1)
    }

    /// The level as a vector in canonical itemset order.
    pub fn sorted_level(&self, k: usize) -> Vec<(&Itemset, u32)> {
        let mut v: Vec<(&Itemset, u32)> = match self.level(k) {
            Some(level) => level.iter().map(|(itemset, &count)| (itemset, count)).collect(),
            None => vec![],
        };
        v.sort();
        v
    }

    pub fn support(&self, itemset: &Itemset) -> Option<u32> {
        self.level(itemset.len())
            .and_then(|level| level.get(itemset))
            .cloned()
    }

    /// Size of the largest frequent itemset.
    pub fn max_size(&self) -> usize {
        self.levels
            .iter()
            .rposition(|level| !level.is_empty())
            .map_or(0, |i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(|level| level.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    /// Every (itemset, support) pair, smallest itemsets first.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, u32)> {
        self.levels
            .iter()
            .flat_map(|level| level.iter().map(|(itemset, &count)| (itemset, count)))
    }
}

use crate::dataset::Dataset;
use crate::error::Result;
use crate::frequent_itemsets::{FrequentItemsets, Level};
use crate::item_counter::ItemCounter;
use crate::itemset::Itemset;
use crate::miner::{ItemsetMiner, MinerOptions};
use crate::support::min_count;
use crate::vec_sets::union;
use fnv::FnvHashSet;
use rayon::prelude::*;
use tracing::debug;

/// Level-wise join-based frequent itemset miner.
pub struct Apriori {
    options: MinerOptions,
}

impl Apriori {
    pub fn new(options: MinerOptions) -> Apriori {
        Apriori { options }
    }
}

impl ItemsetMiner for Apriori {
    fn name(&self) -> &'static str {
        "apriori"
    }

    fn mine(&self, dataset: &Dataset) -> Result<FrequentItemsets> {
        self.options.validate()?;
        let min_count = min_count(self.options.min_support, dataset.num_transactions());
        debug!("Minimum support count: {}", min_count);
        let mut itemsets = FrequentItemsets::new(dataset.num_transactions(), min_count);

        let level = frequent_items(dataset, min_count);
        debug!("Found {} 1-frequent itemset(s)", level.len());
        if level.is_empty() {
            return Ok(itemsets);
        }
        itemsets.push_level(level)?;

        let mut k = 2;
        while self.options.allows(k) {
            let previous = itemsets.level(k - 1).map_or_else(Vec::new, |level| {
                level.keys().cloned().collect::<Vec<Itemset>>()
            });
            let candidates: Vec<Itemset> = itemset_join(&previous, &previous, k)?
                .into_iter()
                .filter(|candidate| has_frequent_subsets(candidate, &itemsets))
                .collect();
            debug!("Generated {} {}-candidate itemset(s)", candidates.len(), k);

            let level = count_candidates(dataset, candidates, min_count);
            debug!("Found {} {}-frequent itemset(s)", level.len(), k);
            if level.is_empty() {
                break;
            }
            itemsets.push_level(level)?;
            k += 1;
        }

        Ok(itemsets)
    }
}

/// Mines `dataset` with the join-based engine.
pub fn find_frequent_itemsets(dataset: &Dataset, min_support: f64) -> Result<FrequentItemsets> {
    Apriori::new(MinerOptions::new(min_support)).mine(dataset)
}

/// Joins two sets of (k-1)-itemsets into the k-itemsets formed by any pair's
/// union. Unions of any other size are dropped, and the result holds each set
/// once no matter how many pairs produced it.
pub fn itemset_join(left: &[Itemset], right: &[Itemset], k: usize) -> Result<FnvHashSet<Itemset>> {
    let mut joined: FnvHashSet<Itemset> = FnvHashSet::default();
    for l in left {
        for r in right {
            let items = union(l.items(), r.items());
            if items.len() != k {
                continue;
            }
            joined.insert(Itemset::from_sorted(items, k)?);
        }
    }
    Ok(joined)
}

// Downward closure: a candidate can only be frequent if all of its
// (k-1)-subsets are. This prunes candidates before the counting pass without
// changing which ones survive it.
fn has_frequent_subsets(candidate: &Itemset, itemsets: &FrequentItemsets) -> bool {
    candidate
        .subsets_one_smaller()
        .all(|subset| itemsets.support(&subset).is_some())
}

fn frequent_items(dataset: &Dataset, min_count: u32) -> Level {
    let mut item_count = ItemCounter::new();
    for transaction in dataset.transactions() {
        for item in transaction {
            item_count.add(item, 1);
        }
    }
    item_count
        .items_with_count_at_least(min_count)
        .into_iter()
        .map(|item| (Itemset::singleton(item), item_count.get(&item)))
        .collect()
}

fn count_candidates(dataset: &Dataset, candidates: Vec<Itemset>, min_count: u32) -> Level {
    let transactions = dataset.transactions();
    candidates
        .into_par_iter()
        .map(|candidate| {
            let count = transactions
                .iter()
                .filter(|transaction| candidate.is_subset_of(transaction))
                .count() as u32;
            (candidate, count)
        })
        .filter(|&(_, count)| count >= min_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{find_frequent_itemsets, itemset_join, Apriori};
    use crate::dataset::Dataset;
    use crate::frequent_itemsets::FrequentItemsets;
    use crate::item::Item;
    use crate::itemset::{canonicalize, Itemset};
    use crate::miner::{ItemsetMiner, MinerOptions};

    fn set(nums: &[u32]) -> Itemset {
        canonicalize(nums.iter().map(|&i| Item::with_id(i)), nums.len()).unwrap()
    }

    fn example() -> Dataset {
        Dataset::from_transactions(vec![
            vec!["A", "C", "D"],
            vec!["B", "C", "E"],
            vec!["A", "B", "C", "E"],
            vec!["B", "E"],
        ])
        .unwrap()
    }

    fn support_of(dataset: &Dataset, table: &FrequentItemsets, items: &[&str]) -> Option<u32> {
        let ids = dataset.itemizer().to_id_vec(items).unwrap();
        let itemset = canonicalize(ids, items.len()).unwrap();
        table.support(&itemset)
    }

    #[test]
    fn test_itemset_join() {
        let level: Vec<Itemset> = vec![set(&[1, 2]), set(&[1, 3]), set(&[2, 3]), set(&[3, 4])];
        let joined = itemset_join(&level, &level, 3).unwrap();
        let mut ids: Vec<Vec<u32>> = joined.iter().map(|s| s.ids()).collect();
        ids.sort();
        assert_eq!(ids, vec![vec![1, 2, 3], vec![1, 3, 4], vec![2, 3, 4]]);
        for itemset in &joined {
            assert_eq!(itemset.len(), 3);
        }
    }

    #[test]
    fn test_itemset_join_singletons() {
        let level: Vec<Itemset> = vec![set(&[1]), set(&[2]), set(&[3])];
        let joined = itemset_join(&level, &level, 2).unwrap();
        assert_eq!(joined.len(), 3);
        assert!(joined.contains(&set(&[2, 1])));
        assert!(joined.contains(&set(&[1, 3])));
        assert!(joined.contains(&set(&[3, 2])));
    }

    #[test]
    fn test_example_levels() {
        let dataset = example();
        let table = find_frequent_itemsets(&dataset, 0.5).unwrap();
        assert_eq!(table.min_count(), 2);

        assert_eq!(table.level(1).unwrap().len(), 4);
        assert_eq!(support_of(&dataset, &table, &["A"]), Some(2));
        assert_eq!(support_of(&dataset, &table, &["B"]), Some(3));
        assert_eq!(support_of(&dataset, &table, &["C"]), Some(3));
        assert_eq!(support_of(&dataset, &table, &["E"]), Some(3));
        assert_eq!(support_of(&dataset, &table, &["D"]), None);

        assert_eq!(table.level(2).unwrap().len(), 4);
        assert_eq!(support_of(&dataset, &table, &["A", "C"]), Some(2));
        assert_eq!(support_of(&dataset, &table, &["C", "B"]), Some(2));
        assert_eq!(support_of(&dataset, &table, &["E", "B"]), Some(3));
        assert_eq!(support_of(&dataset, &table, &["C", "E"]), Some(2));
        assert_eq!(support_of(&dataset, &table, &["A", "B"]), None);

        assert_eq!(table.level(3).unwrap().len(), 1);
        assert_eq!(support_of(&dataset, &table, &["B", "C", "E"]), Some(2));
        assert!(table.level(4).is_none());
        assert_eq!(table.max_size(), 3);
    }

    #[test]
    fn test_single_transaction_every_subset_frequent() {
        let dataset = Dataset::from_transactions(vec![vec!["x", "y", "z", "w"]]).unwrap();
        let table = find_frequent_itemsets(&dataset, 0.1).unwrap();
        assert_eq!(table.len(), 15);
        assert!(table.iter().all(|(_, count)| count == 1));
    }

    #[test]
    fn test_max_itemset_size() {
        let dataset = example();
        let table = Apriori::new(MinerOptions::new(0.5).with_max_itemset_size(2))
            .mine(&dataset)
            .unwrap();
        assert_eq!(table.max_size(), 2);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_nothing_frequent() {
        let dataset = Dataset::from_transactions(vec![vec!["a"], vec!["b"], vec!["c"]]).unwrap();
        let table = find_frequent_itemsets(&dataset, 0.9).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_size(), 0);
    }

    #[test]
    fn test_invalid_support_is_rejected() {
        assert!(find_frequent_itemsets(&example(), 0.0).is_err());
        assert!(find_frequent_itemsets(&example(), 1.2).is_err());
    }
}

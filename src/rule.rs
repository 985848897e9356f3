use crate::error::{MiningError, Result};
use crate::frequent_itemsets::FrequentItemsets;
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub confidence: f64,
    pub lift: f64,
    pub support: f64,
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Rule {
    /// Builds (antecedent => consequent) for a frequent itemset with
    /// `itemset_support`, returning `None` if its confidence is below
    /// `min_confidence`. The antecedent and consequent supports come from
    /// `itemsets`; if either is missing or zero the tables are inconsistent
    /// and that is an error.
    pub fn make(
        antecedent: Itemset,
        consequent: Itemset,
        itemset_support: u32,
        itemsets: &FrequentItemsets,
        min_confidence: f64,
    ) -> Result<Option<Rule>> {
        let a_sup = lookup(itemsets, &antecedent)?;
        let confidence = f64::from(itemset_support) / f64::from(a_sup);
        if confidence < min_confidence {
            return Ok(None);
        }

        let c_sup = lookup(itemsets, &consequent)?;
        let num_transactions = itemsets.num_transactions() as f64;
        let lift = confidence * num_transactions / f64::from(c_sup);

        Ok(Some(Rule {
            antecedent,
            consequent,
            confidence,
            lift,
            support: f64::from(itemset_support) / num_transactions,
        }))
    }

    // The candidate formed from two rules of the same itemset:
    //  - the antecedent is the intersection of both rules' antecedents, and
    //  - the consequent is the union of both rules' consequents.
    pub fn merge(a: &Rule, b: &Rule) -> (Itemset, Itemset) {
        (
            a.antecedent.intersection(&b.antecedent),
            a.consequent.union(&b.consequent),
        )
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        [
            self.antecedent.to_string(itemizer),
            " => ".to_owned(),
            self.consequent.to_string(itemizer),
        ]
        .join("")
    }
}

fn lookup(itemsets: &FrequentItemsets, itemset: &Itemset) -> Result<u32> {
    match itemsets.support(itemset) {
        Some(0) => Err(MiningError::ZeroSupport {
            items: itemset.ids(),
        }),
        Some(support) => Ok(support),
        None => Err(MiningError::MissingSupport {
            items: itemset.ids(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use crate::error::MiningError;
    use crate::frequent_itemsets::FrequentItemsets;
    use crate::item::Item;
    use crate::itemset::{canonicalize, Itemset};

    fn set(nums: &[u32]) -> Itemset {
        canonicalize(nums.iter().map(|&i| Item::with_id(i)), nums.len()).unwrap()
    }

    fn table() -> FrequentItemsets {
        // B=1, E=2 over four transactions.
        let mut table = FrequentItemsets::new(4, 2);
        table.insert(set(&[1]), 3).unwrap();
        table.insert(set(&[2]), 3).unwrap();
        table.insert(set(&[1, 2]), 3).unwrap();
        table
    }

    #[test]
    fn test_make_computes_measures() {
        let rule = Rule::make(set(&[1]), set(&[2]), 3, &table(), 0.8)
            .unwrap()
            .unwrap();
        assert_eq!(rule.confidence(), 1.0);
        assert!((rule.lift() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(rule.support(), 0.75);
    }

    #[test]
    fn test_make_filters_by_confidence() {
        let mut table = table();
        table.insert(set(&[3]), 4).unwrap();
        table.insert(set(&[1, 3]), 2).unwrap();
        // 2 / 4 = 0.5
        assert!(Rule::make(set(&[3]), set(&[1]), 2, &table, 0.6).unwrap().is_none());
        assert!(Rule::make(set(&[3]), set(&[1]), 2, &table, 0.5).unwrap().is_some());
    }

    #[test]
    fn test_missing_and_zero_support_are_errors() {
        match Rule::make(set(&[7]), set(&[2]), 3, &table(), 0.1) {
            Err(MiningError::MissingSupport { items }) => assert_eq!(items, vec![7]),
            other => panic!("unexpected {:?}", other),
        }
        let mut table = table();
        table.insert(set(&[5]), 0).unwrap();
        match Rule::make(set(&[5]), set(&[2]), 3, &table, 0.1) {
            Err(MiningError::ZeroSupport { items }) => assert_eq!(items, vec![5]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_merge() {
        let mut table = FrequentItemsets::new(4, 1);
        let sets: Vec<Vec<u32>> = vec![vec![1], vec![2], vec![3], vec![1, 2], vec![1, 3], vec![2, 3]];
        for s in &sets {
            table.insert(set(s), 2).unwrap();
        }
        let a = Rule::make(set(&[1, 2]), set(&[3]), 2, &table, 0.0).unwrap().unwrap();
        let b = Rule::make(set(&[1, 3]), set(&[2]), 2, &table, 0.0).unwrap().unwrap();
        let (antecedent, consequent) = Rule::merge(&a, &b);
        assert_eq!(antecedent, set(&[1]));
        assert_eq!(consequent, set(&[2, 3]));
        assert!(a != b);
    }
}

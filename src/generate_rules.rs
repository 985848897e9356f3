use crate::error::Result;
use crate::frequent_itemsets::FrequentItemsets;
use crate::itemset::Itemset;
use crate::rule::Rule;
use crate::support::{validate_lift, validate_ratio};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};
use std::mem;
use tracing::debug;

/// The rules derived from one frequent itemset, keyed by consequent length.
#[derive(Clone, Debug)]
pub struct ItemsetRules {
    pub itemset: Itemset,
    pub support: u32,
    pub rules: BTreeMap<usize, Vec<Rule>>,
}

/// All rules that passed the thresholds, grouped by originating itemset.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    groups: Vec<ItemsetRules>,
}

impl RuleTable {
    pub fn groups(&self) -> &[ItemsetRules] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.groups
            .iter()
            .flat_map(|group| group.rules.values().flat_map(|rules| rules.iter()))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Derives association rules from a table produced by either miner.
///
/// Rules for an itemset of size L start from the L single-item consequents.
/// Each following round merges pairs of surviving rules with consequents one
/// item shorter: antecedents intersect, consequents unite. Only rules that
/// met `min_confidence` take part in a round, so a rule that can only be
/// derived through a rejected one is never evaluated, in the same way
/// Apriori never counts a candidate with an infrequent subset. Moving an
/// item from antecedent to consequent never raises confidence, so this
/// pruning loses no rule that meets the threshold.
///
/// `min_lift` only filters what is returned; it does not prune expansion.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    min_confidence: f64,
    min_lift: Option<f64>,
) -> Result<RuleTable> {
    validate_ratio("minimum confidence", min_confidence)?;
    if let Some(min_lift) = min_lift {
        validate_lift(min_lift)?;
    }

    let mut groups: Vec<ItemsetRules> = vec![];
    for size in 2..=itemsets.max_size() {
        for (itemset, support) in itemsets.sorted_level(size) {
            let mut rules = rules_for_itemset(itemset, support, itemsets, min_confidence)?;
            if let Some(min_lift) = min_lift {
                for level in rules.values_mut() {
                    level.retain(|rule| rule.lift >= min_lift);
                }
                rules.retain(|_, level| !level.is_empty());
            }
            if rules.is_empty() {
                continue;
            }
            for level in rules.values_mut() {
                level.sort_by(|a, b| {
                    OrderedFloat(b.confidence)
                        .cmp(&OrderedFloat(a.confidence))
                        .then_with(|| a.antecedent.cmp(&b.antecedent))
                });
            }
            groups.push(ItemsetRules {
                itemset: itemset.clone(),
                support,
                rules,
            });
        }
    }

    let table = RuleTable { groups };
    debug!("Found {} valid association rules", table.len());
    Ok(table)
}

fn rules_for_itemset(
    itemset: &Itemset,
    support: u32,
    itemsets: &FrequentItemsets,
    min_confidence: f64,
) -> Result<BTreeMap<usize, Vec<Rule>>> {
    let size = itemset.len();
    let mut found: BTreeMap<usize, Vec<Rule>> = BTreeMap::new();

    // First level candidates are all the rules with consequents of size 1.
    let mut candidates: Vec<Rule> = vec![];
    for &item in itemset.items() {
        let antecedent = itemset.without(item);
        let consequent = Itemset::singleton(item);
        if let Some(rule) = Rule::make(antecedent, consequent, support, itemsets, min_confidence)? {
            candidates.push(rule);
        }
    }

    let mut consequent_len = 1;
    while !candidates.is_empty() {
        let next_len = consequent_len + 1;
        let mut next_candidates: Vec<Rule> = vec![];
        if size > 2 {
            // Ordered so the rules come out in the same order every run.
            let mut merged: BTreeSet<(Itemset, Itemset)> = BTreeSet::new();
            for candidate_index in 0..candidates.len() {
                for other_index in (candidate_index + 1)..candidates.len() {
                    let (antecedent, consequent) =
                        Rule::merge(&candidates[candidate_index], &candidates[other_index]);
                    if !antecedent.is_empty()
                        && consequent.len() == next_len
                        && antecedent.len() + consequent.len() == size
                    {
                        merged.insert((antecedent, consequent));
                    }
                }
            }
            for (antecedent, consequent) in merged {
                if let Some(rule) = Rule::make(antecedent, consequent, support, itemsets, min_confidence)? {
                    next_candidates.push(rule);
                }
            }
        }
        found.insert(consequent_len, mem::replace(&mut candidates, next_candidates));
        consequent_len = next_len;
    }

    Ok(found)
}

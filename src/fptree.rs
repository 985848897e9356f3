// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::frequent_itemsets::FrequentItemsets;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::canonicalize;
use crate::miner::{ItemsetMiner, MinerOptions};
use crate::support::min_count;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::collections::VecDeque;
use tracing::debug;

const ROOT: usize = 0;

#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    children: Vec<usize>,
    parent: usize,
    // Next node elsewhere in the tree with the same item.
    next: Option<usize>,
}

impl FPNode {
    fn new(item: Item, parent: usize) -> FPNode {
        FPNode {
            item,
            count: 0,
            children: Vec::with_capacity(1),
            parent,
            next: None,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

/// One path of a conditional pattern base: the items above an occurrence of
/// the suffix item, root first, weighted by that occurrence's count.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrefixPath {
    pub items: Vec<Item>,
    pub count: u32,
}

/// Prefix tree of frequency-ordered transactions.
///
/// Nodes live in an arena and refer to each other by index: parents own
/// their children's slots, and the per-item `next` links threaded through
/// the header table are plain indices used only for traversal.
pub struct FPTree {
    nodes: Vec<FPNode>,
    header: FnvHashMap<Item, usize>,
    // Items in the tree, most frequent first.
    item_order: Vec<Item>,
}

impl FPTree {
    fn new() -> FPTree {
        FPTree {
            nodes: vec![FPNode::new(Item::null(), ROOT)],
            header: FnvHashMap::default(),
            item_order: vec![],
        }
    }

    /// Builds the tree for `transactions`, keeping only items with at least
    /// `min_count` occurrences.
    pub fn build(transactions: &[Vec<Item>], min_count: u32) -> FPTree {
        FPTree::from_paths(transactions.iter().map(|t| (t.as_slice(), 1)), min_count)
    }

    /// Builds the conditional tree for a pattern base, each path weighted by
    /// its count.
    pub fn conditional(base: &[PrefixPath], min_count: u32) -> FPTree {
        FPTree::from_paths(
            base.iter().map(|path| (path.items.as_slice(), path.count)),
            min_count,
        )
    }

    fn from_paths<'a, I>(paths: I, min_count: u32) -> FPTree
    where
        I: Iterator<Item = (&'a [Item], u32)> + Clone,
    {
        // First pass: which items survive, and in what order.
        let mut item_count = ItemCounter::new();
        for (path, count) in paths.clone() {
            for item in path {
                item_count.add(item, count);
            }
        }
        let mut item_order = item_count.items_with_count_at_least(min_count);
        item_count.sort_descending(&mut item_order);
        let rank: FnvHashMap<Item, usize> = item_order
            .iter()
            .enumerate()
            .map(|(index, &item)| (item, index))
            .collect();

        // Second pass: insert each path filtered and sorted by that order.
        let mut tree = FPTree::new();
        let mut ordered: Vec<Item> = vec![];
        for (path, count) in paths {
            ordered.clear();
            ordered.extend(path.iter().cloned().filter(|item| rank.contains_key(item)));
            if ordered.is_empty() {
                continue;
            }
            ordered.sort_by_key(|item| rank[item]);
            tree.insert(&ordered, count);
        }
        tree.item_order = item_order;
        tree.link_headers();
        tree
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(item, parent));
        self.nodes[parent].children.push(id);
        id
    }

    fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id]
            .children
            .iter()
            .cloned()
            .find(|&child| self.nodes[child].item == item)
    }

    fn insert_child(&mut self, id: usize, item: Item, count: u32) -> usize {
        let child_id = match self.child_of(id, item) {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].count += count;
        child_id
    }

    fn insert(&mut self, transaction: &[Item], count: u32) {
        // Start iterating at the root node.
        let mut id = ROOT;
        for &item in transaction {
            id = self.insert_child(id, item, count);
        }
    }

    // Threads each item's nodes into a list in pre-order traversal order,
    // anchored at the header table.
    fn link_headers(&mut self) {
        let mut tails: FnvHashMap<Item, usize> = FnvHashMap::default();
        let mut stack: Vec<usize> = vec![ROOT];
        while let Some(id) = stack.pop() {
            let item = self.nodes[id].item;
            if !item.is_null() {
                match tails.insert(item, id) {
                    Some(tail) => self.nodes[tail].next = Some(id),
                    None => {
                        self.header.insert(item, id);
                    }
                }
            }
            stack.extend(self.nodes[id].children.iter().rev().cloned());
        }
    }

    /// Items present in the tree, most frequent first.
    pub fn item_order(&self) -> &[Item] {
        &self.item_order
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    fn item_nodes(&self, item: Item) -> ItemNodes<'_> {
        ItemNodes {
            tree: self,
            next: self.header.get(&item).cloned(),
        }
    }

    /// Total count of `item`, summed along its header links.
    pub fn item_support(&self, item: Item) -> u32 {
        self.item_nodes(item).map(|node| node.count).sum()
    }

    /// Every item's conditional pattern base, gathered by a single
    /// breadth-first pass that carries each node's prefix path with it.
    pub fn conditional_pattern_bases(&self) -> FnvHashMap<Item, Vec<PrefixPath>> {
        let mut bases: FnvHashMap<Item, Vec<PrefixPath>> = FnvHashMap::default();
        let mut queue: VecDeque<(usize, Vec<Item>)> = VecDeque::new();
        queue.push_back((ROOT, vec![]));
        while let Some((id, prefix)) = queue.pop_front() {
            let node = &self.nodes[id];
            if !node.is_root() && !prefix.is_empty() {
                bases.entry(node.item).or_insert_with(Vec::new).push(PrefixPath {
                    items: prefix.clone(),
                    count: node.count,
                });
            }
            for &child in &node.children {
                let mut child_prefix = prefix.clone();
                if !node.is_root() {
                    child_prefix.push(node.item);
                }
                queue.push_back((child, child_prefix));
            }
        }
        bases
    }

    /// If no node branches, the (item, count) pairs from the root down.
    pub fn single_path(&self) -> Option<Vec<(Item, u32)>> {
        let mut path = vec![];
        let mut id = ROOT;
        loop {
            let children = &self.nodes[id].children;
            match children.len() {
                0 => return Some(path),
                1 => {
                    id = children[0];
                    path.push((self.nodes[id].item, self.nodes[id].count));
                }
                _ => return None,
            }
        }
    }
}

struct ItemNodes<'a> {
    tree: &'a FPTree,
    next: Option<usize>,
}

impl<'a> Iterator for ItemNodes<'a> {
    type Item = &'a FPNode;
    fn next(&mut self) -> Option<&'a FPNode> {
        let id = self.next?;
        let node = &self.tree.nodes[id];
        self.next = node.next;
        Some(node)
    }
}

/// Prefix-tree based frequent itemset miner.
///
/// Instead of recursing, each conditional tree is pushed onto a work stack
/// together with the suffix it was built for, so stack depth stays flat
/// however long the itemsets get. Within one tree suffix items are taken
/// least frequent first and their conditional trees pushed in that order,
/// so the most frequent item's tree is popped and mined first.
pub struct FPGrowth {
    options: MinerOptions,
}

impl FPGrowth {
    pub fn new(options: MinerOptions) -> FPGrowth {
        FPGrowth { options }
    }
}

impl ItemsetMiner for FPGrowth {
    fn name(&self) -> &'static str {
        "fpgrowth"
    }

    fn mine(&self, dataset: &Dataset) -> Result<FrequentItemsets> {
        self.options.validate()?;
        let min_count = min_count(self.options.min_support, dataset.num_transactions());
        debug!("Minimum support count: {}", min_count);
        let mut itemsets = FrequentItemsets::new(dataset.num_transactions(), min_count);

        let fptree = FPTree::build(dataset.transactions(), min_count);
        debug!(
            "Built FPTree with {} nodes over {} frequent items",
            fptree.num_nodes(),
            fptree.item_order().len()
        );

        let mut work: Vec<(FPTree, Vec<Item>)> = vec![(fptree, vec![])];
        while let Some((tree, suffix)) = work.pop() {
            if let Some(path) = tree.single_path() {
                insert_path_combinations(&path, &suffix, &self.options, &mut itemsets)?;
                continue;
            }

            let mut bases = tree.conditional_pattern_bases();
            for &item in tree.item_order().iter().rev() {
                let support = tree.item_support(item);
                if support < min_count {
                    continue;
                }
                let mut itemset = suffix.clone();
                itemset.push(item);
                let size = itemset.len();
                itemsets.insert(canonicalize(itemset.iter().cloned(), size)?, support)?;

                if !self.options.allows(size + 1) {
                    continue;
                }
                if let Some(base) = bases.remove(&item) {
                    let conditional_tree = FPTree::conditional(&base, min_count);
                    if !conditional_tree.is_empty() {
                        work.push((conditional_tree, itemset));
                    }
                }
            }
        }

        for k in 1..=itemsets.max_size() {
            debug!(
                "Found {} {}-frequent itemset(s)",
                itemsets.level(k).map_or(0, |level| level.len()),
                k
            );
        }
        Ok(itemsets)
    }
}

/// Mines `dataset` with the prefix-tree engine.
pub fn fp_growth(dataset: &Dataset, min_support: f64) -> Result<FrequentItemsets> {
    FPGrowth::new(MinerOptions::new(min_support)).mine(dataset)
}

// On a single path every combination of nodes is frequent, with the support
// of its least frequent node.
fn insert_path_combinations(
    path: &[(Item, u32)],
    suffix: &[Item],
    options: &MinerOptions,
    itemsets: &mut FrequentItemsets,
) -> Result<()> {
    for k in 1..=path.len() {
        let size = suffix.len() + k;
        if !options.allows(size) {
            break;
        }
        for combination in path.iter().combinations(k) {
            let support = combination.iter().map(|&&(_, count)| count).min().unwrap_or(0);
            let items = suffix
                .iter()
                .cloned()
                .chain(combination.iter().map(|&&(item, _)| item));
            itemsets.insert(canonicalize(items, size)?, support)?;
        }
    }
    Ok(())
}

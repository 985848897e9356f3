//! Frequent itemset mining and association rule generation.
//!
//! Two interchangeable miners, `Apriori` and `FPGrowth`, turn a `Dataset`
//! into a `FrequentItemsets` table; `generate_rules` derives association
//! rules from either table.

pub mod apriori;
pub mod command_line_args;
pub mod dataset;
pub mod error;
pub mod fptree;
pub mod frequent_itemsets;
pub mod generate_rules;
pub mod index;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod miner;
pub mod output;
pub mod rule;
pub mod support;
pub mod transaction_reader;
pub mod vec_sets;


pub use apriori::Apriori;
pub use dataset::Dataset;
pub use error::{MiningError, Result};
pub use fptree::FPGrowth;
pub use frequent_itemsets::FrequentItemsets;
pub use generate_rules::{generate_rules, RuleTable};
pub use itemset::{canonicalize, Itemset};
pub use miner::{Algorithm, CrossCheck, ItemsetMiner, MinerOptions};
pub use rule::Rule;

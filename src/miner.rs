use crate::apriori::Apriori;
use crate::dataset::Dataset;
use crate::error::{MiningError, Result};
use crate::fptree::FPGrowth;
use crate::frequent_itemsets::FrequentItemsets;
use crate::support::validate_ratio;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

/// Parameters shared by both frequent itemset miners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinerOptions {
    /// Fraction of transactions an itemset must appear in, in (0, 1].
    pub min_support: f64,
    /// Stop growing itemsets past this size.
    pub max_itemset_size: Option<usize>,
}

impl MinerOptions {
    pub fn new(min_support: f64) -> MinerOptions {
        MinerOptions {
            min_support,
            max_itemset_size: None,
        }
    }

    pub fn with_max_itemset_size(mut self, max_itemset_size: usize) -> MinerOptions {
        self.max_itemset_size = Some(max_itemset_size);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_ratio("minimum support", self.min_support)?;
        if self.max_itemset_size == Some(0) {
            return Err(MiningError::InvalidThreshold {
                name: "maximum itemset size",
                range: "[1, inf)",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// True if itemsets of `size` are allowed.
    pub fn allows(&self, size: usize) -> bool {
        self.max_itemset_size.map_or(true, |max| size <= max)
    }
}

/// A frequent itemset mining engine. Implementations keep no state between
/// calls; mining the same dataset twice gives equal tables.
pub trait ItemsetMiner {
    fn name(&self) -> &'static str;
    fn mine(&self, dataset: &Dataset) -> Result<FrequentItemsets>;
}

/// Runs both engines over the same dataset and returns the table only if
/// they produced identical results.
pub struct CrossCheck {
    options: MinerOptions,
}

impl CrossCheck {
    pub fn new(options: MinerOptions) -> CrossCheck {
        CrossCheck { options }
    }
}

impl ItemsetMiner for CrossCheck {
    fn name(&self) -> &'static str {
        "both"
    }

    fn mine(&self, dataset: &Dataset) -> Result<FrequentItemsets> {
        let timer = Instant::now();
        let apriori = Apriori::new(self.options).mine(dataset)?;
        info!(
            "apriori found {} frequent itemsets in {} ms.",
            apriori.len(),
            timer.elapsed().as_millis()
        );

        let timer = Instant::now();
        let fpgrowth = FPGrowth::new(self.options).mine(dataset)?;
        info!(
            "fpgrowth found {} frequent itemsets in {} ms.",
            fpgrowth.len(),
            timer.elapsed().as_millis()
        );

        if apriori != fpgrowth {
            return Err(MiningError::EngineMismatch {
                apriori: apriori.len(),
                fpgrowth: fpgrowth.len(),
            });
        }
        Ok(fpgrowth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Apriori,
    FPGrowth,
    Both,
}

impl Algorithm {
    pub fn miner(self, options: MinerOptions) -> Box<dyn ItemsetMiner> {
        match self {
            Algorithm::Apriori => Box::new(Apriori::new(options)),
            Algorithm::FPGrowth => Box::new(FPGrowth::new(options)),
            Algorithm::Both => Box::new(CrossCheck::new(options)),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Algorithm, String> {
        match s.to_ascii_lowercase().as_str() {
            "apriori" => Ok(Algorithm::Apriori),
            "fpgrowth" | "fp-growth" => Ok(Algorithm::FPGrowth),
            "both" => Ok(Algorithm::Both),
            _ => Err(format!("unknown algorithm '{}', expected apriori, fpgrowth or both", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Apriori => write!(f, "apriori"),
            Algorithm::FPGrowth => write!(f, "fpgrowth"),
            Algorithm::Both => write!(f, "both"),
        }
    }
}

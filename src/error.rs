use thiserror::Error;

/// Convenience result type used across the miners and the rule generator.
pub type Result<T> = std::result::Result<T, MiningError>;

/// Every failure the miner can hit. None of these are recoverable: the
/// binary logs the error and exits non-zero.
#[derive(Debug, Error)]
pub enum MiningError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A transaction contained something that isn't a usable item token.
    #[error("invalid item in transaction {transaction}: {reason}")]
    InvalidItem { transaction: usize, reason: String },

    #[error("{name} must be in range {range}, got {value}")]
    InvalidThreshold {
        name: &'static str,
        range: &'static str,
        value: f64,
    },

    /// An itemset failed its canonical-form post-condition: wrong length,
    /// a repeated item, or items out of order.
    #[error("itemset {items:?} is not canonical: expected {expected} distinct sorted items")]
    Canonicalization { items: Vec<u32>, expected: usize },

    #[error("itemset {items:?} was produced more than once")]
    DuplicateItemset { items: Vec<u32> },

    #[error("itemset {items:?} of size {len} inserted at level {level}")]
    LevelMismatch {
        items: Vec<u32>,
        len: usize,
        level: usize,
    },

    /// A subset of a frequent itemset was missing from the table.
    #[error("no support recorded for itemset {items:?}")]
    MissingSupport { items: Vec<u32> },

    #[error("itemset {items:?} has zero support, cannot compute confidence")]
    ZeroSupport { items: Vec<u32> },

    /// The two engines disagreed on the same dataset and thresholds.
    #[error("apriori found {apriori} frequent itemsets but fpgrowth found {fpgrowth}, or their supports differ")]
    EngineMismatch { apriori: usize, fpgrowth: usize },
}

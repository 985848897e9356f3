use crate::error::{MiningError, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use tracing::debug;

/// The in-memory transaction list every miner works from.
///
/// Each transaction is stored as a sorted, duplicate-free vector of items.
/// Empty transactions carry no information and are dropped; they do not
/// count toward the transaction total used for support ratios.
pub struct Dataset {
    itemizer: Itemizer,
    transactions: Vec<Vec<Item>>,
}

impl Dataset {
    /// Interns every token and normalizes each transaction. Fails on an
    /// empty or whitespace-only token rather than guessing what it meant.
    pub fn from_transactions<T, I, S>(transactions: T) -> Result<Dataset>
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<Vec<S>> = transactions
            .into_iter()
            .map(|t| t.into_iter().collect())
            .collect();

        for (index, transaction) in raw.iter().enumerate() {
            if let Some(position) = transaction.iter().position(|s| s.as_ref().trim().is_empty()) {
                return Err(MiningError::InvalidItem {
                    transaction: index,
                    reason: format!("empty item token at position {}", position),
                });
            }
        }

        let itemizer = Itemizer::from_tokens(raw.iter().flat_map(|t| t.iter().map(|s| s.as_ref())));

        let mut dropped = 0;
        let mut normalized: Vec<Vec<Item>> = Vec::with_capacity(raw.len());
        for transaction in &raw {
            let mut items: Vec<Item> = transaction
                .iter()
                .filter_map(|s| itemizer.id_of(s.as_ref()))
                .collect();
            // Some input files have transactions with duplicate items.
            items.sort();
            items.dedup();
            if items.is_empty() {
                dropped += 1;
                continue;
            }
            normalized.push(items);
        }

        debug!(
            "Loaded {} transactions over {} distinct items ({} empty transactions dropped)",
            normalized.len(),
            itemizer.len(),
            dropped
        );

        Ok(Dataset {
            itemizer,
            transactions: normalized,
        })
    }

    pub fn itemizer(&self) -> &Itemizer {
        &self.itemizer
    }

    pub fn transactions(&self) -> &[Vec<Item>] {
        &self.transactions
    }

    pub fn num_transactions(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use crate::error::MiningError;

    #[test]
    fn test_transactions_are_sorted_and_deduplicated() {
        let dataset = Dataset::from_transactions(vec![
            vec!["c", "a", "b", "a"],
            vec!["b", "b"],
        ])
        .unwrap();
        let itemizer = dataset.itemizer();
        assert_eq!(dataset.num_transactions(), 2);
        assert_eq!(
            dataset.transactions()[0],
            itemizer.to_id_vec(&["a", "b", "c"]).unwrap()
        );
        assert_eq!(dataset.transactions()[1], itemizer.to_id_vec(&["b"]).unwrap());
    }

    #[test]
    fn test_empty_transactions_are_dropped() {
        let transactions: Vec<Vec<&str>> = vec![vec!["a"], vec![], vec!["b", "a"]];
        let dataset = Dataset::from_transactions(transactions).unwrap();
        assert_eq!(dataset.num_transactions(), 2);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        match Dataset::from_transactions(vec![vec!["a"], vec!["b", " "]]) {
            Err(MiningError::InvalidItem { transaction, .. }) => assert_eq!(transaction, 1),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("empty token accepted"),
        }
    }
}

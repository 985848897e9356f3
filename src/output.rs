use crate::error::Result;
use crate::frequent_itemsets::FrequentItemsets;
use crate::generate_rules::RuleTable;
use crate::itemizer::Itemizer;
use std::io::Write;
use std::path::Path;

/// Writes one `itemset,support` record per frequent itemset, smallest
/// itemsets first and in canonical order within a size.
pub fn write_itemsets<W: Write>(writer: W, itemsets: &FrequentItemsets, itemizer: &Itemizer) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&["Itemset", "Support"])?;
    for k in 1..=itemsets.max_size() {
        for (itemset, support) in itemsets.sorted_level(k) {
            wtr.write_record(&[itemset.to_string(itemizer), support.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one `antecedent,consequent,confidence,lift,support` record per
/// rule, measures to two decimal places.
pub fn write_rules<W: Write>(writer: W, rules: &RuleTable, itemizer: &Itemizer) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&["Antecedent", "Consequent", "Confidence", "Lift", "Support"])?;
    for rule in rules.iter() {
        wtr.write_record(&[
            rule.antecedent.to_string(itemizer),
            rule.consequent.to_string(itemizer),
            format!("{:.2}", rule.confidence()),
            format!("{:.2}", rule.lift()),
            format!("{:.2}", rule.support()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_itemsets_to_path<P: AsRef<Path>>(path: P, itemsets: &FrequentItemsets, itemizer: &Itemizer) -> Result<()> {
    write_itemsets(std::fs::File::create(path)?, itemsets, itemizer)
}

pub fn write_rules_to_path<P: AsRef<Path>>(path: P, rules: &RuleTable, itemizer: &Itemizer) -> Result<()> {
    write_rules(std::fs::File::create(path)?, rules, itemizer)
}

#[cfg(test)]
mod tests {
    use super::{write_itemsets, write_rules, write_rules_to_path};
    use crate::apriori::find_frequent_itemsets;
    use crate::dataset::Dataset;
    use crate::generate_rules::generate_rules;

    fn example() -> Dataset {
        Dataset::from_transactions(vec![
            vec!["A", "C", "D"],
            vec!["B", "C", "E"],
            vec!["A", "B", "C", "E"],
            vec!["B", "E"],
        ])
        .unwrap()
    }

    #[test]
    fn test_write_itemsets() {
        let dataset = example();
        let itemsets = find_frequent_itemsets(&dataset, 0.5).unwrap();
        let mut out: Vec<u8> = vec![];
        write_itemsets(&mut out, &itemsets, dataset.itemizer()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Itemset,Support",
                "A,2",
                "B,3",
                "C,3",
                "E,3",
                "A C,2",
                "B C,2",
                "B E,3",
                "C E,2",
                "B C E,2",
            ]
        );
    }

    #[test]
    fn test_write_rules() {
        let dataset = example();
        let itemsets = find_frequent_itemsets(&dataset, 0.5).unwrap();
        let rules = generate_rules(&itemsets, 0.8, None).unwrap();
        let mut out: Vec<u8> = vec![];
        write_rules(&mut out, &rules, dataset.itemizer()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Antecedent,Consequent,Confidence,Lift,Support");
        assert!(lines.contains(&"B,E,1.00,1.33,0.75"));
        assert!(lines.contains(&"B C,E,1.00,1.33,0.50"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_write_rules_to_path() {
        let dataset = example();
        let itemsets = find_frequent_itemsets(&dataset, 0.5).unwrap();
        let rules = generate_rules(&itemsets, 0.8, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.csv");
        write_rules_to_path(&path, &rules, dataset.itemizer()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Antecedent,Consequent"));
    }
}

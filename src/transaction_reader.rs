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
use std::io::Read;
use std::path::Path;
use tracing::debug;

// One transaction per line, items separated by commas, no header row.
// Lines may have any number of fields; blank lines are skipped.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

pub fn read_transactions<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = reader_builder().from_reader(reader);
    let mut transactions: Vec<Vec<String>> = vec![];
    for result in rdr.records() {
        let record = result?;
        transactions.push(record.iter().map(String::from).collect());
    }
    debug!("Read {} transactions", transactions.len());
    Dataset::from_transactions(transactions)
}

pub fn read_transactions_from_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    read_transactions(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::read_transactions;
    use crate::error::MiningError;

    #[test]
    fn test_read_transactions() {
        let data = "a,b,c\nb, c\n\nc,c,a\n";
        let dataset = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(dataset.num_transactions(), 3);
        let itemizer = dataset.itemizer();
        assert_eq!(itemizer.len(), 3);
        assert_eq!(
            dataset.transactions()[1],
            itemizer.to_id_vec(&["b", "c"]).unwrap()
        );
        assert_eq!(
            dataset.transactions()[2],
            itemizer.to_id_vec(&["a", "c"]).unwrap()
        );
    }

    #[test]
    fn test_empty_field_is_rejected() {
        match read_transactions("a,,b\n".as_bytes()) {
            Err(MiningError::InvalidItem { transaction, .. }) => assert_eq!(transaction, 0),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("empty field accepted"),
        }
    }
}

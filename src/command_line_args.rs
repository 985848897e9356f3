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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption};

use crate::error::Result;
use crate::miner::{Algorithm, MinerOptions};
use crate::support::{validate_lift, validate_ratio};

pub struct Arguments {
    pub input_file_path: String,
    pub output_itemsets_path: String,
    pub output_rules_path: String,
    pub min_support: f64,
    pub min_confidence: f64,
    pub min_lift: Option<f64>,
    pub algorithm: Algorithm,
    pub max_itemset_size: Option<usize>,
}

impl Arguments {
    pub fn miner_options(&self) -> MinerOptions {
        let options = MinerOptions::new(self.min_support);
        match self.max_itemset_size {
            Some(max_itemset_size) => options.with_max_itemset_size(max_itemset_size),
            None => options,
        }
    }

    /// Range checks that argparse can't express.
    pub fn validate(&self) -> Result<()> {
        self.miner_options().validate()?;
        validate_ratio("minimum confidence", self.min_confidence)?;
        if let Some(min_lift) = self.min_lift {
            validate_lift(min_lift)?;
        }
        Ok(())
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let mut input_file_path = String::new();
    let mut output_itemsets_path = String::from("itemsets.csv");
    let mut output_rules_path = String::from("rules.csv");
    let mut min_support: f64 = 0.0;
    let mut min_confidence: f64 = 0.0;
    let mut min_lift: Option<f64> = None;
    let mut algorithm = String::from("fpgrowth");
    let mut max_itemset_size: Option<usize> = None;

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Frequent itemset and association rule mining with Apriori or FPGrowth.");

        parser
            .refer(&mut input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset in CSV format, one transaction per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut output_itemsets_path)
            .add_option(
                &["--output-itemsets"],
                Store,
                "File path in which to store frequent itemsets. \
                 Format: itemset, support count.",
            )
            .metavar("file_path");

        parser
            .refer(&mut output_rules_path)
            .add_option(
                &["--output-rules"],
                Store,
                "File path in which to store output rules. \
                 Format: antecedent, consequent, confidence, lift, support.",
            )
            .metavar("file_path");

        parser
            .refer(&mut min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut min_confidence)
            .add_option(
                &["--min-confidence"],
                Store,
                "Minimum rule confidence threshold, in range (0,1].",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut min_lift)
            .add_option(
                &["--min-lift"],
                StoreOption,
                "Minimum rule lift threshold, in range (0,∞].",
            )
            .metavar("threshold");

        parser
            .refer(&mut algorithm)
            .add_option(
                &["--algorithm"],
                Store,
                "Frequent itemset miner: apriori, fpgrowth (default), \
                 or both to run the two and check they agree.",
            )
            .metavar("name");

        parser
            .refer(&mut max_itemset_size)
            .add_option(
                &["--max-itemset-size"],
                StoreOption,
                "Don't mine itemsets larger than this.",
            )
            .metavar("size");

        if env::args().count() == 1 {
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    let algorithm = match algorithm.parse::<Algorithm>() {
        Ok(algorithm) => algorithm,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let args = Arguments {
        input_file_path,
        output_itemsets_path,
        output_rules_path,
        min_support,
        min_confidence,
        min_lift,
        algorithm,
        max_itemset_size,
    };

    if let Err(err) = args.validate() {
        eprintln!("{}", err);
        process::exit(1);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::Arguments;
    use crate::error::MiningError;
    use crate::miner::Algorithm;

    fn arguments() -> Arguments {
        Arguments {
            input_file_path: "in.csv".to_owned(),
            output_itemsets_path: "itemsets.csv".to_owned(),
            output_rules_path: "rules.csv".to_owned(),
            min_support: 0.5,
            min_confidence: 0.8,
            min_lift: None,
            algorithm: Algorithm::FPGrowth,
            max_itemset_size: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(arguments().validate().is_ok());

        let mut args = arguments();
        args.min_lift = Some(1.5);
        assert!(args.validate().is_ok());

        let mut args = arguments();
        args.min_support = 0.0;
        assert!(args.validate().is_err());

        let mut args = arguments();
        args.min_confidence = 1.5;
        match args.validate() {
            Err(MiningError::InvalidThreshold { name, value, .. }) => {
                assert_eq!(name, "minimum confidence");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut args = arguments();
        args.min_lift = Some(0.0);
        assert!(args.validate().is_err());

        let mut args = arguments();
        args.max_itemset_size = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_miner_options() {
        let mut args = arguments();
        args.max_itemset_size = Some(3);
        let options = args.miner_options();
        assert_eq!(options.min_support, 0.5);
        assert_eq!(options.max_itemset_size, Some(3));
        assert_eq!(arguments().miner_options().max_itemset_size, None);
    }
}

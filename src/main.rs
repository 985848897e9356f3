use assoc_rules::command_line_args::{parse_args_or_exit, Arguments};
use assoc_rules::generate_rules;
use assoc_rules::output::{write_itemsets_to_path, write_rules_to_path};
use assoc_rules::transaction_reader::read_transactions_from_path;
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn mine(args: &Arguments) -> assoc_rules::Result<()> {
    info!("Mining data set: {}", args.input_file_path);
    let start = Instant::now();
    let timer = Instant::now();
    let dataset = read_transactions_from_path(&args.input_file_path)?;
    info!(
        "Read {} transactions over {} items in {} ms.",
        dataset.num_transactions(),
        dataset.itemizer().len(),
        timer.elapsed().as_millis()
    );

    let miner = args.algorithm.miner(args.miner_options());
    info!(
        "Mining frequent itemsets with {}, minimum support {}...",
        miner.name(),
        args.min_support
    );
    let timer = Instant::now();
    let itemsets = miner.mine(&dataset)?;
    info!(
        "{} generated {} frequent itemsets (largest size {}) in {} ms.",
        miner.name(),
        itemsets.len(),
        itemsets.max_size(),
        timer.elapsed().as_millis()
    );

    info!("Generating rules, minimum confidence {}...", args.min_confidence);
    let timer = Instant::now();
    let rules = generate_rules(&itemsets, args.min_confidence, args.min_lift)?;
    info!(
        "Generated {} rules in {} ms.",
        rules.len(),
        timer.elapsed().as_millis()
    );

    write_itemsets_to_path(&args.output_itemsets_path, &itemsets, dataset.itemizer())?;
    write_rules_to_path(&args.output_rules_path, &rules, dataset.itemizer())?;
    info!(
        "Wrote {} and {}",
        args.output_itemsets_path, args.output_rules_path
    );

    info!("Total runtime: {} ms", start.elapsed().as_millis());
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let arguments = parse_args_or_exit();

    if let Err(err) = mine(&arguments) {
        error!("Error: {}", err);
        process::exit(1);
    }
}

//! Ordering statistics over random sum-of-products functions.
//!
//! Builds each function under the identity ordering and under the best
//! ordering found by the search, checks every assignment, and reports the
//! average node counts.
//!
//! Run with:
//! ```bash
//! cargo run --release --example stats -- --max-vars 10 --functions 100
//! ```

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use bdd_order::expr::{BooleanFunction, Expression};
use bdd_order::ordering::{format_assignment, VarOrder};
use bdd_order::search::SearchConfig;
use bdd_order::store::NodeStore;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Largest number of variables to test.
    #[arg(long, value_name = "INT", default_value = "6")]
    max_vars: usize,

    /// Random functions per variable count.
    #[arg(long, value_name = "INT", default_value = "10")]
    functions: usize,

    /// Orderings tried per function (defaults to the variable count).
    #[arg(long, value_name = "INT")]
    trials: Option<usize>,

    /// Seed for functions and orderings.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        _ => simplelog::LevelFilter::Debug,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("seed = {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut store = NodeStore::default();

    {
        let d = store.create("AB+C", "ABC")?;
        let errors = (0..8u32)
            .map(|i| (0..3).map(|j| (i >> j) & 1 == 1).collect::<Vec<_>>())
            .filter(|bits| d.evaluate_bits(bits).ok() != Some((bits[0] && bits[1]) || bits[2]))
            .count();
        println!("AB+C: {} nodes, {} errors", d.size(), errors);
    }

    for num_vars in 3..=args.max_vars {
        println!("Testing {} random functions of {} variables...", args.functions, num_vars);
        let mut total_direct = 0usize;
        let mut total_best = 0usize;

        for i in 0..args.functions {
            let num_terms = rng.random_range(1..=3);
            let f = Expression::random(&mut rng, num_vars, num_terms);
            let text = f.to_string();

            let direct = store
                .create(&text, &VarOrder::identity(f.num_vars()).to_string())?
                .size();

            let mut config = SearchConfig::default().with_seed(rng.random());
            if let Some(trials) = args.trials {
                config = config.with_trials(trials);
            }
            let best = store.create_with_search(&text, &config)?;

            let mut errors = 0;
            for k in 0..1u32 << f.num_vars() {
                let bits: Vec<bool> = (0..f.num_vars()).map(|j| (k >> j) & 1 == 1).collect();
                if best.evaluate_bits(&bits)? != f.evaluate(&bits) {
                    println!("Error: {} at {}", text, format_assignment(&bits));
                    errors += 1;
                }
            }

            println!(
                "Function {}: {}, direct: {} nodes, best: {} nodes ({}){}",
                i + 1,
                text,
                direct,
                best.size(),
                best.order(),
                if errors > 0 { format!(", {} errors", errors) } else { String::new() }
            );
            total_direct += direct;
            total_best += best.size();
        }

        let avg_direct = total_direct as f64 / args.functions.max(1) as f64;
        let avg_best = total_best as f64 / args.functions.max(1) as f64;
        let reduction = if avg_direct > 0.0 {
            100.0 * (1.0 - avg_best / avg_direct)
        } else {
            0.0
        };
        println!("Results for {} variables:", num_vars);
        println!("  average nodes (identity ordering): {:.2}", avg_direct);
        println!("  average nodes (best ordering):     {:.2}", avg_best);
        println!("  average reduction:                 {:.2}%", reduction);
    }

    Ok(())
}

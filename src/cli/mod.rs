// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates everything else to Layer 2.
//
// Three commands are supported:
//   1. `train`    — trains a network and checkpoints the best one
//   2. `evaluate` — scores a checkpoint against a relation file
//   3. `convert`  — rewrites a relation file
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConvertArgs, EvaluateArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "mlp-trainer",
    version,
    about = "Train a feed-forward MLP on ARFF-like relation files."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Convert(args)  => run_convert(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}'", args.input);
    let report = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Training complete. Initial score {:.6}, best score {:.6}, {} checkpoint(s) written.",
        report.initial_score,
        report.best_score,
        report.checkpoints.len()
    );
    if report.stopped_early {
        println!("Stopped early after {} iterations.", report.iterations_run);
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let eval = EvaluateUseCase::new(args.checkpoint, args.input).execute()?;
    if args.show_predictions {
        for (i, row) in eval.predictions.iter_rows().enumerate() {
            println!("{i}: {row:?}");
        }
    }
    println!(
        "Rows: {}\nTotal absolute error: {:.6}\nMean absolute error: {:.6}",
        eval.rows, eval.total, eval.mean
    );
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    use crate::application::convert_use_case::ConvertUseCase;

    let rows = ConvertUseCase::new(args.input, args.output.clone(), args.name, args.description)
        .execute()?;
    println!("Wrote {} rows to '{}'", rows, args.output);
    Ok(())
}

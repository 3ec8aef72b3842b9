// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `evaluate` and
// `convert`, and all their configurable flags.
//
// clap's derive macros generate help text, missing-argument
// errors and type conversion (string → usize, f64, ...).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::ml::orchestrator::EarlyStop;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train an MLP on a relation file, checkpointing the best model
    Train(TrainArgs),

    /// Score a saved checkpoint against a relation file
    Evaluate(EvaluateArgs),

    /// Rewrite a relation file with synthetic attribute names
    Convert(ConvertArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Relation (.arff) file with the training data
    #[arg(long)]
    pub input: String,

    /// Hidden layer widths, comma separated (e.g. "3,3")
    #[arg(long, default_value = "8")]
    pub network: String,

    /// SGD learning rate
    #[arg(long, default_value_t = 0.1)]
    pub learn_rate: f64,

    /// Number of incremental training passes after the initial one
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,

    /// Checkpoint path for the best model
    #[arg(long, default_value = "models/mlp")]
    pub output: String,

    /// Full-batch SGD steps per training pass
    #[arg(long, default_value_t = 100)]
    pub epochs_per_pass: usize,

    /// Stop as soon as the best score drops below 1e-4
    /// (by default this is only logged)
    #[arg(long)]
    pub stop_on_low_score: bool,

    /// Append per-iteration scores to this CSV file
    #[arg(long)]
    pub metrics_csv: Option<String>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            input:           a.input,
            network:         a.network,
            learn_rate:      a.learn_rate,
            iterations:      a.iterations,
            output:          a.output,
            epochs_per_pass: a.epochs_per_pass,
            early_stop:      if a.stop_on_low_score {
                EarlyStop::Break
            } else {
                EarlyStop::LogOnly
            },
            metrics_csv:     a.metrics_csv,
            layer_sizes:     Vec::new(),
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Relation (.arff) file to score against
    #[arg(long)]
    pub input: String,

    /// Checkpoint path given to `train --output`
    #[arg(long, default_value = "models/mlp")]
    pub checkpoint: String,

    /// Also print the squashed prediction for every row
    #[arg(long)]
    pub show_predictions: bool,
}

/// All arguments for the `convert` command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Relation (.arff) file to read
    #[arg(long)]
    pub input: String,

    /// Relation (.arff) file to write
    #[arg(long)]
    pub output: String,

    /// @RELATION name (defaults to the input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Description written as a comment header
    #[arg(long, default_value = "")]
    pub description: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_args_map_to_config() {
        let cli = Cli::try_parse_from([
            "mlp-trainer",
            "train",
            "--input",
            "xor.arff",
            "--network",
            "3,3",
            "--iterations",
            "20",
            "--stop-on-low-score",
        ])
        .unwrap();

        let Commands::Train(args) = cli.command else {
            panic!("expected train subcommand");
        };
        let cfg = TrainConfig::from(args);
        assert_eq!(cfg.input, "xor.arff");
        assert_eq!(cfg.network, "3,3");
        assert_eq!(cfg.iterations, 20);
        assert_eq!(cfg.early_stop, EarlyStop::Break);
        assert_eq!(cfg.output, "models/mlp");
        assert!(cfg.metrics_csv.is_none());
    }

    #[test]
    fn test_train_requires_input() {
        assert!(Cli::try_parse_from(["mlp-trainer", "train"]).is_err());
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from([
            "mlp-trainer",
            "convert",
            "--input",
            "a.arff",
            "--output",
            "b.arff",
        ])
        .unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(args.output, "b.arff");
        assert!(args.name.is_none());
    }

    #[test]
    fn test_evaluate_args() {
        let cli = Cli::try_parse_from([
            "mlp-trainer",
            "evaluate",
            "--input",
            "a.arff",
            "--show-predictions",
        ])
        .unwrap();
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate subcommand");
        };
        assert_eq!(args.checkpoint, "models/mlp");
        assert!(args.show_predictions);
    }
}

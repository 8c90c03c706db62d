use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ndarray::Array1;
use serde::Deserialize;
use tracing::info;

use nn_trainer::dataset::{self, Dataset};
use nn_trainer::logging::init_logging;
use nn_trainer::model::{ForwardPassResult, TrainingReport};
use nn_trainer::perceptron::DEFAULT_PERCEPTRON_STDEV;
use nn_trainer::{
    ExampleOrder, Learner, Network, NetworkConfig, OutputActivation, Perceptron, TrainingConfig, fit,
};

#[derive(Parser)]
#[command(name = "nn-trainer", version, about = "Train small feed-forward networks on truth tables")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in datasets
    Datasets,
    /// Train a model and print its predictions
    Train(TrainArgs),
    /// Train a model, then print every layer's activations for one input
    Forward {
        #[command(flatten)]
        train: TrainArgs,
        /// Comma separated input values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        input: Vec<f64>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModelKind {
    /// tanh hidden layer, sigmoid output layer
    #[default]
    Network,
    /// single weight layer
    Perceptron,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ActivationArg {
    Sigmoid,
    Threshold,
    Linear,
}

impl From<ActivationArg> for OutputActivation {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::Sigmoid => OutputActivation::Sigmoid,
            ActivationArg::Threshold => OutputActivation::Threshold,
            ActivationArg::Linear => OutputActivation::Linear,
        }
    }
}

#[derive(Args)]
struct TrainArgs {
    /// Built-in dataset name (see `datasets`)
    #[arg(short, long)]
    dataset: Option<String>,
    #[arg(short, long, value_enum)]
    model: Option<ModelKind>,
    /// Hidden layer width
    #[arg(long, value_name = "INT")]
    hidden: Option<usize>,
    #[arg(short, long, value_name = "FLOAT")]
    learning_rate: Option<f64>,
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    /// Standard deviation of the initial weights
    #[arg(long, value_name = "FLOAT")]
    stdev: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Visit examples in a fresh random order every epoch
    #[arg(long)]
    shuffle: bool,
    /// Perceptron output activation
    #[arg(long, value_enum)]
    activation: Option<ActivationArg>,
    #[arg(long, value_name = "INT")]
    log_every: Option<usize>,
    /// JSON file with defaults; command line flags take precedence
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

/// Config file format. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    dataset: Option<String>,
    model: Option<ModelKind>,
    activation: Option<OutputActivation>,
    network: Option<NetworkConfig>,
    training: Option<TrainingConfig>,
}

fn load_config(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

struct Run {
    dataset: Dataset,
    model: ModelKind,
    activation: OutputActivation,
    network: NetworkConfig,
    perceptron_stdev: f64,
    training: TrainingConfig,
}

fn resolve(args: &TrainArgs) -> Result<Run> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let name = args
        .dataset
        .clone()
        .or(file.dataset)
        .unwrap_or_else(|| "xor".to_string());
    let dataset = dataset::builtin(&name)?;

    let mut network = file.network.unwrap_or_default();
    network.input_size = dataset.input_size();
    network.output_size = dataset.output_size();
    if let Some(hidden) = args.hidden {
        network.hidden_size = hidden;
    }
    if let Some(stdev) = args.stdev {
        network.weight_stdev = stdev;
    }
    if args.seed.is_some() {
        network.seed = args.seed;
    }
    if args.shuffle {
        network.example_order = ExampleOrder::Shuffled;
    }

    let mut training = file.training.unwrap_or_default();
    if let Some(lr) = args.learning_rate {
        training.learning_rate = lr;
    }
    if let Some(epochs) = args.epochs {
        training.epochs = epochs;
    }
    if let Some(every) = args.log_every {
        training.log_every = every;
    }

    Ok(Run {
        dataset,
        model: args.model.or(file.model).unwrap_or_default(),
        activation: args
            .activation
            .map(OutputActivation::from)
            .or(file.activation)
            .unwrap_or_default(),
        perceptron_stdev: args.stdev.unwrap_or(DEFAULT_PERCEPTRON_STDEV),
        network,
        training,
    })
}

enum Model {
    Network(Network),
    Perceptron(Perceptron),
}

impl Model {
    fn build(run: &Run) -> Result<Self> {
        Ok(match run.model {
            ModelKind::Network => Model::Network(Network::new(run.network.clone())?),
            ModelKind::Perceptron => Model::Perceptron(Perceptron::new(
                run.dataset.input_size(),
                run.dataset.output_size(),
                run.activation,
                run.perceptron_stdev,
                run.network.seed,
            )?),
        })
    }

    fn learner(&mut self) -> &mut dyn Learner {
        match self {
            Model::Network(net) => net as &mut dyn Learner,
            Model::Perceptron(p) => p as &mut dyn Learner,
        }
    }

    fn forward_pass(&self, x: &Array1<f64>) -> Result<ForwardPassResult> {
        Ok(match self {
            Model::Network(net) => net.forward_pass(x)?,
            Model::Perceptron(p) => ForwardPassResult {
                activations: vec![x.to_vec(), p.forward(x)?.to_vec()],
            },
        })
    }
}

fn train(args: &TrainArgs) -> Result<(Model, TrainingReport)> {
    let run = resolve(args)?;
    let mut model = Model::build(&run)?;
    info!(dataset = run.dataset.name(), model = ?run.model, "model built");
    let report = fit(model.learner(), &run.dataset, &run.training)?;
    Ok((model, report))
}

fn fmt_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

fn print_report(report: &TrainingReport) {
    let shape: Vec<String> = report
        .model
        .layers
        .first()
        .map(|l| l.input_dim)
        .into_iter()
        .chain(report.model.layers.iter().map(|l| l.output_dim))
        .map(|n| n.to_string())
        .collect();
    println!(
        "{} ({}) on '{}': {} epochs at learning rate {}",
        report.model.name,
        shape.join("-"),
        report.dataset,
        report.history.len(),
        report.learning_rate
    );
    if let (Some(first), Some(last)) = (report.first_residual(), report.final_residual()) {
        println!("mean squared residual: {first:.5} -> {last:.5}");
    }
    println!();
    println!("{:<24}{:<16}output", "input", "target");
    for p in &report.predictions {
        println!(
            "{:<24}{:<16}{}",
            fmt_values(&p.input),
            fmt_values(&p.target),
            fmt_values(&p.output)
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Datasets => {
            for name in dataset::builtin_names() {
                let ds = dataset::builtin(name)?;
                println!(
                    "{:<6}{} -> {}  ({} examples)",
                    name,
                    ds.input_size(),
                    ds.output_size(),
                    ds.len()
                );
            }
        }
        Command::Train(args) => {
            let (_, report) = train(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Forward { train: args, input } => {
            let (model, report) = train(&args)?;
            let pass = model.forward_pass(&Array1::from(input))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&pass)?);
            } else {
                if let Some(last) = report.final_residual() {
                    println!("trained {} epochs, mean squared residual {last:.5}", report.history.len());
                }
                for (i, layer) in pass.activations.iter().enumerate() {
                    let label = match i {
                        0 => "input",
                        n if n + 1 == pass.activations.len() => "output",
                        _ => "hidden",
                    };
                    println!("{label:<8}{}", fmt_values(layer));
                }
            }
        }
    }
    Ok(())
}

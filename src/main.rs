use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use policy2prism::naming;
use policy2prism::output::setup_output_files;
use policy2prism::prism;
use policy2prism::problem::load_problem;
use policy2prism::timings::Timings;


/// Command line argument parser.
#[derive(Parser, Debug)]
#[command(about = "Export an MDP policy as a PRISM model file", long_about = None)]
pub struct Args {
    /// Path to the problem file holding the MDP and its policy.
    problem_file: PathBuf,

    /// Discount factor the policy was computed with.
    #[arg(short, long, default_value_t = 0.95)]
    discount: f64,

    /// Planning horizon the policy was computed with.
    #[arg(short = 'H', long, default_value_t = 10.0)]
    horizon: f64,

    /// Print the model to stdout instead of storing results.
    #[arg(long)]
    dry_run: bool,

    /// Switch to a dry run when the results directory cannot be created or written.
    #[arg(long)]
    fallback_dry_run: bool,
}


fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();
    let args = Args::parse();
    let mut timings = Timings::new();

    info!("Reading problem file: {}", args.problem_file.display());
    timings.start("Load");
    let problem = load_problem(&args.problem_file)
        .with_context(|| format!("Unable to load {}", args.problem_file.display()))?;
    timings.stop("Load");
    info!("Policy:\n{}", problem.policy);

    let output = setup_output_files(
        &args.problem_file, args.discount, args.horizon, args.dry_run, args.fallback_dry_run,
    ).context("Unable to set up output files")?;

    let module = match &output {
        Some(paths) => prism::module_name(&paths.model)?,
        None => naming::base_name(&args.problem_file)?,
    };
    timings.start("Encode");
    let text = prism::encode(&problem.model, &problem.policy, &module)
        .context("Unable to encode PRISM model")?;
    timings.stop("Encode");

    let Some(paths) = output else {
        println!("{}", text);
        return Ok(());
    };

    timings.start("Write");
    prism::save_model_text(&paths.model, &text)
        .with_context(|| format!("Unable to write {}", paths.model.display()))?;
    timings.stop("Write");
    timings.save(&paths.timings)
        .with_context(|| format!("Unable to write {}", paths.timings.display()))?;

    info!("Wrote {}", paths.model.display());
    info!("Wrote {}", paths.timings.display());
    Ok(())
}

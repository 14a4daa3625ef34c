use jssp_swarm::experiment::JsspExperiment;
use jssp_swarm::experiment_config::ExperimentConfig;
use jssp_swarm::jssp::export::SVG;
use jssp_swarm::jssp::import::read_problem;
use jssp_swarm::jssp::{Evaluator, ProblemInstance};
use jssp_swarm::solver::{SolverResult, Supervisor};

use clap::Parser;
use csv::Writer;
use glob::glob;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jssp-swarm")]
#[command(version, about = "Job shop scheduling with ant colonies and particle swarms", long_about = None)]
struct Args {
    /// The experiment config, either YAML or RON
    #[arg(short, long)]
    config: PathBuf,

    /// Glob patterns of the problem instance files to solve
    #[arg(short, long, required = true, num_args = 1..)]
    instance: Vec<String>,

    /// Directory to write the epoch statistics of every instance to, as csv
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Directory to write the Gantt chart of every best schedule to, as svg
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Show a progress bar while solving
    #[arg(long)]
    progress: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn instance_paths(patterns: &[String]) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let before = paths.len();
        for entry in glob(pattern)? {
            paths.push(entry?);
        }
        if paths.len() == before {
            warn!(pattern = pattern.as_str(), "pattern did not match any file");
        }
    }

    Ok(paths)
}

fn solve(args: &Args, config: &ExperimentConfig, problem: &ProblemInstance) -> Result<SolverResult, Box<dyn Error>> {
    let experiment = JsspExperiment::new(config, problem).with_progress(args.progress);

    let result = match &args.stats {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let writer = Writer::from_path(dir.join(format!("{}.csv", problem.name())))?;
            experiment.run(Supervisor::new(writer))?
        }
        None => experiment.run(Supervisor::default())?,
    };

    Ok(result)
}

fn report(args: &Args, config: &ExperimentConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let problem = read_problem(path)?;
    let result = solve(args, config, &problem)?;

    let chart = Evaluator::new(&problem).schedule(result.best_solution.as_slice());
    if !result.best_solution.is_complete(&problem) || !chart.is_valid() || chart.end_time() != result.best_makespan {
        return Err(format!("Best schedule of {} is not valid.", problem.name()).into());
    }

    match config.solver.benchmark(problem.name()) {
        Some(benchmark) => {
            let gap = 100.0 * (f64::from(result.best_makespan) - f64::from(benchmark)) / f64::from(benchmark);
            info!(
                problem = problem.name(),
                makespan = result.best_makespan,
                benchmark,
                gap_percent = gap,
                instance = result.best_instance,
                "solved"
            )
        }
        None => info!(
            problem = problem.name(),
            makespan = result.best_makespan,
            instance = result.best_instance,
            "solved"
        ),
    }
    for summary in result.instances.iter() {
        info!(
            instance = summary.index,
            engine = summary.engine,
            iterations = summary.ran_iterations,
            best_makespan = ?summary.best_makespan,
            "instance summary"
        );
    }

    println!("{} (makespan {})", problem.name(), result.best_makespan);
    println!("{}", result.best_solution);
    println!("{}", chart);

    if let Some(dir) = &args.svg {
        fs::create_dir_all(dir)?;
        let file = dir.join(format!("{}.svg", problem.name()));
        fs::write(&file, SVG::default().export_gantt_chart(&chart, problem.name())?)?;
        info!(file = %file.display(), "wrote gantt chart");
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    let config = ExperimentConfig::from_path(&args.config)?;
    config.validate()?;

    let paths = instance_paths(&args.instance)?;
    if paths.is_empty() {
        return Err("No problem instance found.".into());
    }

    for path in paths.iter() {
        report(&args, &config, path)?;
    }

    Ok(())
}

use ai_lab::config::Command;
use ai_lab::utils::{logger, validation::Validate};
use ai_lab::{
    BreadthFirst, CliConfig, ConsoleOutput, DepthFirst, LabConfig, LabError, LabRunner,
    RecursiveDepthFirst, TraversalExercise,
};
use clap::Parser;

fn dispatch(command: &Command, config: &LabConfig, runner: &LabRunner<ConsoleOutput>) -> ai_lab::Result<()> {
    let graph = &config.graph;
    match command {
        Command::Temperature { .. } => {
            runner.run(&config.temperature_exercise())?;
        }
        Command::Car { .. } => {
            runner.run(&config.car_exercise())?;
        }
        Command::Dims { .. } => {
            runner.run(&config.dimensions_exercise())?;
        }
        Command::Bfs { .. } => {
            let exercise = TraversalExercise::new(BreadthFirst, graph.adjacency.clone(), &graph.start);
            runner.run(&exercise)?;
        }
        Command::Dfs { recursive: false, .. } => {
            let exercise = TraversalExercise::new(DepthFirst, graph.adjacency.clone(), &graph.start);
            runner.run(&exercise)?;
        }
        Command::Dfs { recursive: true, .. } => {
            let exercise =
                TraversalExercise::new(RecursiveDepthFirst, graph.adjacency.clone(), &graph.start);
            runner.run(&exercise)?;
        }
        Command::All => {
            for sub in [
                Command::Temperature { seed: None, days: None, hours: None, export_csv: None },
                Command::Car { drive: None },
                Command::Dims { literals: Vec::new() },
                Command::Bfs { start: None },
                Command::Dfs { start: None, recursive: false },
            ] {
                dispatch(&sub, config, runner)?;
            }
        }
    }
    Ok(())
}

fn report_failure(e: &LabError) -> i32 {
    tracing::error!(
        "❌ Lab run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    e.severity().exit_code()
}

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ai-lab");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            std::process::exit(report_failure(&e));
        }
    };

    let runner = LabRunner::new(ConsoleOutput::new(cli.format), cli.format);
    if let Err(e) = dispatch(&cli.command, &config, &runner) {
        std::process::exit(report_failure(&e));
    }

    tracing::info!("✅ Done");
}

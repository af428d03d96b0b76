use anyhow::{bail, Context};
use gridvisit::config::{Config, CONFIG_FILE};
use gridvisit::planner::{PlanEvent, PlanOutcome, VisitPlanner};
use gridvisit::render::{format_path, render_grid, render_with_path};
use gridvisit::run_log::RunLog;
use gridvisit::scenario::{ObstacleSpec, Scenario};
use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "Usage: gridvisit [--scenario <file.json> | <x,y,D>...]
Without arguments the built-in 20x20 demo is planned.
Obstacles given as x,y,D (D one of N, S, E, W) are placed on a grid sized by config.toml.";

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}

fn parse_obstacle(arg: &str) -> anyhow::Result<ObstacleSpec> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    let [x, y, direction] = parts.as_slice() else {
        bail!("expected x,y,D but got {:?}", arg);
    };
    Ok(ObstacleSpec {
        x: x.parse().with_context(|| format!("bad x in {:?}", arg))?,
        y: y.parse().with_context(|| format!("bad y in {:?}", arg))?,
        direction: direction.to_string(),
    })
}

fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "--help" || arg == "-h")
}

fn scenario_from_args(args: &[String], config: &Config) -> anyhow::Result<Scenario> {
    match args {
        [] => Ok(Scenario::demo()),
        [flag, path] if flag == "--scenario" => Scenario::load_from_file(path)
            .with_context(|| format!("failed to load scenario {}", path)),
        triples => {
            let mut scenario = Scenario::from_config(config);
            for arg in triples {
                scenario.obstacles.push(parse_obstacle(arg)?);
            }
            Ok(scenario)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let loaded = Config::load_from(CONFIG_FILE);
    let filter = match &loaded {
        Ok(config) => config.logging.filter.clone(),
        Err(_) => Config::default().logging.filter,
    };
    init_tracing(&filter)?;
    let config = Config::resolve(loaded);

    let args: Vec<String> = env::args().skip(1).collect();
    if wants_help(&args) {
        println!("{}", USAGE);
        return Ok(());
    }
    let scenario = scenario_from_args(&args, &config)?;
    let built = scenario.build()?;
    let grid = built.grid;
    let mut robot = built.robot;

    for (spec, placement) in scenario.obstacles.iter().zip(&built.placements) {
        if !placement.is_admitted() {
            println!(
                "Obstacle at ({}, {}) facing {} not placed: {:?}",
                spec.x, spec.y, spec.direction, placement
            );
        }
    }

    println!("Map Size: {}x{}, Obstacles: {}", grid.width, grid.height, grid.obstacles().len());
    for obstacle in grid.obstacles() {
        println!("  {}", obstacle);
    }
    print!("{}", render_grid(&grid, Some(&robot)));

    let planner = VisitPlanner::new(config.planner.to_planner_config());
    let mut run_log = RunLog::new();
    let report = planner.run_with(&grid, &mut robot, |event| {
        if let PlanEvent::Moved { position } = event {
            println!("Moved to {}", position);
        }
        run_log.record(event);
    });

    match &report.outcome {
        PlanOutcome::Complete => println!("All obstacles visited."),
        PlanOutcome::Stalled { unvisited } => {
            println!("Stalled: no reachable sensing position for obstacles {:?}", unvisited)
        }
        PlanOutcome::PassLimit { unvisited } => {
            println!("Gave up after {} passes, unvisited: {:?}", report.passes, unvisited)
        }
    }

    println!("\nPath ({} steps): {}", report.steps, format_path(robot.path()));
    print!("{}", render_with_path(&grid, &robot));
    println!("\n{}", run_log.summary());

    if config.logging.enable_run_log {
        run_log
            .save_to_file(&config.logging.run_log_path)
            .with_context(|| format!("failed to write {}", config.logging.run_log_path))?;
        println!("Run log saved to {}", config.logging.run_log_path);
    }

    if !report.is_complete() {
        std::process::exit(2);
    }
    Ok(())
}

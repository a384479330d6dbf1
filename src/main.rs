use clap::{Parser, Subcommand};
use colored::Colorize;
use router_arena::catalog::{LeaderboardQuery, LeaderboardSort};
use router_arena::cli::{parse_router_list, run_compare, CompareOutput, CompareRequest};
use router_arena::loader::ArenaData;
use router_arena::projector::{BarRow, DeferralSeries};
use router_arena::report::{LeaderboardReport, ReportFormat};
use router_arena::score::{arena_score, cost_efficiency, CostWeight};
use router_arena::types::{ChartView, CompareMetric, Difficulty, RouterType};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "router-arena")]
#[command(version, about = "Leaderboard and comparison engine for LLM routers", long_about = None)]
struct Cli {
    /// Directory holding leaderboard.json, routers.yaml, category_scores.json
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ranked router leaderboard
    Leaderboard {
        /// Ordering key
        #[arg(long, value_enum, default_value = "overall")]
        sort: LeaderboardSort,

        /// Only routers of this type
        #[arg(long, value_enum)]
        router_type: Option<RouterType>,

        /// Case-insensitive name/description filter
        #[arg(long)]
        search: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare up to three routers across categories and difficulties
    Compare {
        /// Comma-separated router ids (max 3)
        #[arg(long)]
        routers: String,

        #[arg(long, value_enum, default_value = "accuracy")]
        metric: CompareMetric,

        #[arg(long, value_enum, default_value = "all")]
        difficulty: Difficulty,

        /// Drill into one category (subcategories become the axes)
        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_enum, default_value = "spider")]
        view: ChartView,

        /// Emit chart rows as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score ad-hoc accuracy/cost values with the arena formula
    Score {
        /// Accuracy in percent, 0-100
        #[arg(long)]
        accuracy: f64,

        /// Cost in USD per 1k queries
        #[arg(long)]
        cost: f64,

        /// Cost weight in [0.05, 0.95]; snaps to the default near it
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Summarize the dataset and catalog
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("router-arena v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Leaderboard {
            sort,
            router_type,
            search,
            format,
            output,
        } => {
            let data = ArenaData::load(&cli.data_dir)?;
            let query = LeaderboardQuery {
                search,
                router_type,
                sort,
            };
            let rows: Vec<_> = query.apply(&data.routers).into_iter().cloned().collect();
            let report = LeaderboardReport::new("Router Arena Leaderboard".to_string(), rows);

            match output {
                Some(path) => {
                    report.save(&path, format)?;
                    println!("{} {}", "Report written to".bright_green(), path.display());
                }
                None => {
                    let content = match format {
                        ReportFormat::Text => report.to_text(),
                        ReportFormat::Markdown => report.to_markdown(),
                        ReportFormat::Json => report.to_json()?,
                    };
                    print!("{content}");
                }
            }
        }

        Commands::Compare {
            routers,
            metric,
            difficulty,
            category,
            view,
            json,
        } => {
            let data = ArenaData::load(&cli.data_dir)?;
            let request = CompareRequest {
                routers: parse_router_list(&routers),
                metric,
                difficulty,
                category,
                view,
            };
            let output = run_compare(&data, &request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                display_compare_output(&output, &request);
            }
        }

        Commands::Score {
            accuracy,
            cost,
            weight,
        } => {
            let weight = weight.map_or_else(CostWeight::default, |w| CostWeight::new(w).snapped());
            let efficiency = cost_efficiency(cost);
            let score = arena_score(accuracy, cost, weight.beta());
            println!("{}", "Arena scoring".bright_cyan().bold());
            println!("  Cost efficiency: {:.2}", efficiency);
            println!(
                "  Arena score:     {:.2}  (weight {:.3}, beta {:.3})",
                score,
                weight.value(),
                weight.beta()
            );
        }

        Commands::Info => {
            let data = ArenaData::load(&cli.data_dir)?;
            println!("{}", "Router Arena".bright_cyan().bold());
            println!("  Routers: {}", data.routers.len());
            if let Some(dataset) = &data.dataset {
                println!("  Queries: {}", dataset.total_queries);
                println!("  Domains: {}", dataset.domains);
                println!("  Categories: {}", dataset.categories);
                println!("  Difficulty levels: {}", dataset.difficulty_levels.join(", "));
            }
            if let Some(top) = data.routers.iter().find(|r| r.metrics.overall_rank == 1) {
                println!(
                    "  {} {} ({})",
                    "Top ranked:".bright_green(),
                    top.name,
                    top.affiliation
                );
            }
        }
    }

    Ok(())
}

fn display_compare_output(output: &CompareOutput, request: &CompareRequest) {
    let scope = request.category.as_deref().unwrap_or("All categories");
    match output {
        CompareOutput::Radar(rows) => {
            println!(
                "{}  {} · {}",
                "Spider axes".bright_cyan().bold(),
                scope,
                request.metric
            );
            for row in rows {
                print!("  {:<50}", row.axis);
                for (id, value) in &row.values {
                    print!("  {id}={value:.1}");
                }
                println!();
            }
        }
        CompareOutput::Bars(rows) => display_bar_rows(rows, scope, request.metric),
        CompareOutput::Deferral(series) => display_deferral(series, request.metric),
    }
}

fn display_bar_rows(rows: &[BarRow], scope: &str, metric: CompareMetric) {
    println!(
        "{}  {} · {}",
        "Difficulty bars".bright_cyan().bold(),
        scope,
        metric
    );
    for row in rows {
        print!("  {:<8}", row.difficulty.to_string());
        for (id, value) in &row.values {
            print!("  {id}={value:.1}");
        }
        println!();
    }
}

fn display_deferral(series: &DeferralSeries, metric: CompareMetric) {
    println!(
        "{}  {} vs cost per 1k",
        "Deferral curve".bright_cyan().bold(),
        metric
    );
    for point in &series.selected {
        println!(
            "  {:<20} {}={:.1}  cost/1k=${:.3}",
            point.router_name, metric, point.metric_value, point.cost_per_1k
        );
    }
    if !series.background.is_empty() {
        println!("  ({} background routers)", series.background.len());
    }
}

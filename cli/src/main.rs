//! Socialgraph CLI: generate a synthetic social graph, load it into a
//! backend and run one analysis over it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use socialgraph::{
    load_snapshot, AnalyticsEngine, GraphBackend, GraphGenerator, InMemoryBackend, ResumeFilter,
    SocialConfig, User, UserKey,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "socialgraph", version, about = "Synthetic social graph generator and analytics")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of users to generate
    #[arg(long, global = true)]
    users: Option<usize>,

    /// Minimum follows per user
    #[arg(long, global = true)]
    min_out_degree: Option<usize>,

    /// Maximum follows per user
    #[arg(long, global = true)]
    max_out_degree: Option<usize>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Store the snapshot in RocksDB at this directory instead of memory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and load a snapshot, then print its size
    Generate,
    /// Number of users per skill
    CountSkills,
    /// Friends-of-friends suggestions for one user
    SuggestFollows {
        #[arg(long)]
        user: u64,
    },
    /// Users followed by many well-followed users
    InfluentialFollowers {
        /// Defaults to the configured threshold
        #[arg(long)]
        min_followers: Option<usize>,
    },
    /// Direct followers of one user
    Followers {
        #[arg(long)]
        user: u64,
    },
    /// Full resume of one user
    Resume {
        #[arg(long)]
        user: u64,
    },
    /// Run the resume filter showcase
    QueryResumes,
    /// User and follow counts
    Stats,
}

/// Tabular result, printed in any output format
struct Report {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    json: serde_json::Value,
}

impl Report {
    fn new(columns: &[&str], json: serde_json::Value) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            json,
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    match &cli.data_dir {
        None => execute(Arc::new(InMemoryBackend::new()), &config, &cli).await,
        Some(dir) => open_rocks(dir, &config, &cli).await,
    }
}

#[cfg(feature = "rocksdb")]
async fn open_rocks(dir: &std::path::Path, config: &SocialConfig, cli: &Cli) -> anyhow::Result<()> {
    let backend = socialgraph::RocksBackend::open(dir)
        .with_context(|| format!("opening RocksDB at {}", dir.display()))?;
    execute(Arc::new(backend), config, cli).await
}

#[cfg(not(feature = "rocksdb"))]
async fn open_rocks(dir: &std::path::Path, _config: &SocialConfig, _cli: &Cli) -> anyhow::Result<()> {
    anyhow::bail!(
        "--data-dir {} requires a build with the `rocksdb` feature",
        dir.display()
    )
}

/// File values first, then command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<SocialConfig> {
    let mut config = match &cli.config {
        Some(path) => SocialConfig::from_path(path)?,
        None => SocialConfig::default(),
    };

    let generator = &mut config.generator;
    if let Some(seed) = cli.seed {
        generator.seed = seed;
    }
    if let Some(users) = cli.users {
        generator.population_size = users;
    }
    if let Some(min) = cli.min_out_degree {
        generator.min_out_degree = min;
    }
    if let Some(max) = cli.max_out_degree {
        generator.max_out_degree = max;
    }
    Ok(config)
}

async fn execute<B>(backend: Arc<B>, config: &SocialConfig, cli: &Cli) -> anyhow::Result<()>
where
    B: GraphBackend + 'static,
{
    let generator = GraphGenerator::new(config.generator.clone());
    let graph = generator.generate().context("generating graph")?;
    load_snapshot(backend.as_ref(), &graph, &config.loader)
        .await
        .context("loading snapshot")?;

    let engine = AnalyticsEngine::new(backend);
    let report = match &cli.command {
        Commands::Generate | Commands::Stats => {
            let stats = engine.stats().await?;
            let mut report = Report::new(&["users", "follows"], serde_json::to_value(stats)?);
            report.row(vec![stats.users.to_string(), stats.follows.to_string()]);
            report
        }
        Commands::CountSkills => {
            let counts = engine.skill_counts().await?;
            let mut report = Report::new(&["skill", "users"], serde_json::to_value(&counts)?);
            for (skill, count) in &counts {
                report.row(vec![skill.to_string(), count.to_string()]);
            }
            report
        }
        Commands::SuggestFollows { user } => {
            let suggestions = engine.friends_of_friends(UserKey::new(*user)).await?;
            let mut report = Report::new(&["user"], serde_json::to_value(&suggestions)?);
            for key in &suggestions {
                report.row(vec![key.as_u64().to_string()]);
            }
            report
        }
        Commands::InfluentialFollowers { min_followers } => {
            let threshold = min_followers.unwrap_or(config.analytics.min_followers);
            let rows = engine.influential_followers(threshold).await?;
            let mut report = Report::new(&["user", "influential_followers"], serde_json::to_value(&rows)?);
            for row in &rows {
                report.row(vec![
                    row.user.as_u64().to_string(),
                    row.influential_followers.to_string(),
                ]);
            }
            report
        }
        Commands::Followers { user } => {
            let followers = engine.followers_of(UserKey::new(*user)).await?;
            let mut report = Report::new(&["follower"], serde_json::to_value(&followers)?);
            for key in &followers {
                report.row(vec![key.as_u64().to_string()]);
            }
            report
        }
        Commands::Resume { user } => {
            let resume = engine.resume(UserKey::new(*user)).await?;
            resume_report(&resume)?
        }
        Commands::QueryResumes => {
            let mut results = Vec::new();
            let mut report = Report::new(&["filter", "matches"], serde_json::Value::Null);
            report.row(vec!["Total resumes".to_string(), engine.total_users().await?.to_string()]);
            for (description, filter) in ResumeFilter::showcase() {
                let count = engine.count_resumes(&filter).await?;
                report.row(vec![description.to_string(), count.to_string()]);
                results.push(serde_json::json!({
                    "description": description,
                    "filter": filter,
                    "matches": count,
                }));
            }
            report.json = serde_json::Value::Array(results);
            report
        }
    };

    print_report(&report, &cli.format)
}

fn resume_report(user: &User) -> anyhow::Result<Report> {
    let mut report = Report::new(&["field", "value"], serde_json::to_value(user)?);
    report.row(vec!["key".into(), user.key.as_u64().to_string()]);
    report.row(vec!["name".into(), user.name.clone()]);
    let skills: Vec<&str> = user.skills.iter().map(|s| s.as_str()).collect();
    report.row(vec!["skills".into(), skills.join(", ")]);
    for position in &user.positions {
        report.row(vec![
            "position".into(),
            format!(
                "{} at {} ({} to {})",
                position.title, position.company, position.start_date, position.end_date
            ),
        ]);
    }
    for education in &user.education {
        report.row(vec![
            "education".into(),
            format!(
                "{} in {}, {} ({} to {})",
                education.degree,
                education.major,
                education.university,
                education.start_date,
                education.end_date
            ),
        ]);
    }
    Ok(report)
}

fn print_report(report: &Report, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.json)?);
        }
        OutputFormat::Csv => {
            println!("{}", report.columns.join(","));
            for row in &report.rows {
                let cells: Vec<String> = row.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if report.rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&report.columns);
            for row in &report.rows {
                table.add_row(row);
            }

            println!("{}", table);
            println!("{} row(s)", report.rows.len());
        }
    }
    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

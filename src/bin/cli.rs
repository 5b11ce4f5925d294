//! Chicken Sales CLI
//!
//! Command-line access to the dashboard:
//! - Print the summary metrics and growth table
//! - Render single charts or the whole HTML page to a file
//! - Check a running server's health
//! - Generate a default config file

use anyhow::{bail, Context};
use chicken_sales::api::dto::{GrowthResponse, SalesResponse, SummaryResponse};
use chicken_sales::chart::{ChartKind, RendererKind};
use chicken_sales::dashboard::{format, html::render_page, Dashboard, DataTable};
use chicken_sales::locale::{month_from_number, Locale};
use chicken_sales::sales::{load_or_default, SalesSeries};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_API_URL: &str = "http://localhost:8501";

#[derive(Parser)]
#[command(name = "chicken-sales-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly chicken sales analysis")]
#[command(long_about = "Summaries, growth rates and charts for a year of chicken sales.\nWorks on local data, or against a running dashboard server with --api-url.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard server URL; summary and growth are fetched from it when set.
    /// Month names are relabeled in --locale, whatever locale the server runs.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// CSV dataset (month,units_sold) instead of the built-in data
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Label language (ko, en)
    #[arg(long, default_value = "ko", global = true)]
    pub locale: Locale,
}

/// How command output is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON as returned by the API
    Json,
    /// CSV with a header row
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show total, average, max, min and best/worst month
    Summary,

    /// Show month-over-month growth rates
    Growth,

    /// Show the raw monthly data
    Table,

    /// Render one chart
    Chart {
        /// Chart kind (line, bar, area, combo)
        kind: ChartKind,
        /// Renderer backend (svg, plotly)
        #[arg(short, long, default_value = "svg")]
        renderer: RendererKind,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the full HTML dashboard
    Render {
        /// Active chart tab
        #[arg(short, long, default_value = "line")]
        tab: ChartKind,
        /// Renderer backend (svg, plotly)
        #[arg(short, long, default_value = "svg")]
        renderer: RendererKind,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the status of a running dashboard server
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "chicken_sales=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let labels = cli.locale.labels();

    match &cli.command {
        Commands::Summary => {
            let data = match &cli.api_url {
                Some(url) => fetch_json(&client, &format!("{}/api/v1/summary", url)).await?,
                None => {
                    let series = load_series(&cli)?;
                    serde_json::to_value(SummaryResponse::new(&series, cli.locale)?)?
                }
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
                OutputFormat::Csv => print_csv(&["metric", "value"], &summary_csv_rows(&data))?,
                OutputFormat::Table => print_summary(&data, cli.locale),
            }
        }

        Commands::Growth => {
            let data = match &cli.api_url {
                Some(url) => fetch_json(&client, &format!("{}/api/v1/growth", url)).await?,
                None => {
                    let series = load_series(&cli)?;
                    serde_json::to_value(GrowthResponse::new(&series, cli.locale))?
                }
            };

            let rows = growth_rows(&data, cli.locale);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
                OutputFormat::Csv => print_csv(&["month", "units_sold", "growth_rate"], &rows)?,
                OutputFormat::Table => print_table(
                    &[labels.month_column, labels.units_column, labels.growth_column],
                    &rows,
                ),
            }
        }

        Commands::Table => {
            let series = load_series(&cli)?;

            match cli.format {
                OutputFormat::Json => {
                    let sales = SalesResponse::new(&series, cli.locale);
                    println!("{}", serde_json::to_string_pretty(&sales)?);
                }
                format @ (OutputFormat::Csv | OutputFormat::Table) => {
                    let table = DataTable::from_series(&series, cli.locale);
                    let headers: Vec<&str> = table.columns.iter().map(String::as_str).collect();

                    if format == OutputFormat::Csv {
                        print_csv(&headers, &table.rows)?;
                    } else {
                        print_table(&headers, &table.rows);
                    }
                }
            }
        }

        Commands::Chart {
            kind,
            renderer,
            output,
        } => {
            let series = load_series(&cli)?;
            let dashboard = Dashboard::new(renderer.build(), cli.locale);
            let chart = dashboard.chart(&series, *kind)?;

            write_output(output.as_deref(), &chart.body)?;
        }

        Commands::Render {
            tab,
            renderer,
            output,
        } => {
            let series = load_series(&cli)?;
            let dashboard = Dashboard::new(renderer.build(), cli.locale);
            let view = dashboard.render(&series, *tab)?;

            write_output(output.as_deref(), &render_page(&view))?;
        }

        Commands::Status => {
            let api_url = cli.api_url.as_deref().unwrap_or(DEFAULT_API_URL);

            let health = match fetch_json(&client, &format!("{}/health", api_url)).await {
                Ok(health) => health,
                Err(e) => {
                    eprintln!("Cannot reach the dashboard server at {}", api_url);
                    eprintln!("Error: {:#}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin chicken-sales");
                    std::process::exit(1);
                }
            };

            println!("Chicken Sales v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Server status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!("  Version:  {}", health["version"].as_str().unwrap_or("-"));
            println!("  Records:  {}", health["records"].as_u64().unwrap_or(0));
            println!("  Renderer: {}", health["renderer"].as_str().unwrap_or("-"));
            println!("  Locale:   {}", health["locale"].as_str().unwrap_or("-"));

            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!();
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Config { output } => {
            let config = chicken_sales::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("Failed to create {:?}", parent))?;
                    }
                    std::fs::write(path, &config)
                        .with_context(|| format!("Failed to write config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn load_series(cli: &Cli) -> anyhow::Result<SalesSeries> {
    load_or_default(cli.data.as_deref()).with_context(|| match &cli.data {
        Some(path) => format!("Failed to load sales data from {:?}", path),
        None => "Failed to load built-in sales data".to_string(),
    })
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> anyhow::Result<Value> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Server returned {}: {}", status, text);
    }

    Ok(response.json().await?)
}

fn write_output(output: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Written to {:?}", path);
        }
        None => println!("{}", body),
    }
    Ok(())
}

/// Month name of a record in the CLI's locale, falling back to the record's own label
fn month_text(record: &Value, locale: Locale) -> String {
    record["month"]
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(month_from_number)
        .map(|month| locale.month_label(month))
        .unwrap_or_else(|| record["label"].as_str().unwrap_or("-").to_string())
}

fn print_summary(data: &Value, locale: Locale) {
    let labels = locale.labels();
    let stats = &data["stats"];

    for (label, key) in [
        (labels.metric_total, "total"),
        (labels.metric_average, "average"),
        (labels.metric_max, "max"),
        (labels.metric_min, "min"),
    ] {
        let value = stats[key].as_u64().unwrap_or(0);
        println!("{:<14} {:>14}", label, format::units(value, labels));
    }

    println!();
    for (label, key) in [(labels.best_month, "best_month"), (labels.worst_month, "worst_month")] {
        let record = &data[key];
        if record.is_null() {
            continue;
        }
        println!(
            "{}: {} ({})",
            label,
            month_text(record, locale),
            format::units(record["units_sold"].as_u64().unwrap_or(0), labels)
        );
    }
}

fn summary_csv_rows(data: &Value) -> Vec<Vec<String>> {
    let stats = &data["stats"];

    let mut rows: Vec<Vec<String>> = ["total", "average", "max", "min"]
        .iter()
        .map(|key| vec![key.to_string(), stats[*key].as_u64().unwrap_or(0).to_string()])
        .collect();

    for key in ["best_month", "worst_month"] {
        if let Some(month) = data[key]["month"].as_u64() {
            rows.push(vec![key.to_string(), month.to_string()]);
        }
    }

    rows
}

/// Growth rows as display strings, from either a local or a fetched response
fn growth_rows(data: &Value, locale: Locale) -> Vec<Vec<String>> {
    let labels = locale.labels();
    let rows = match data["rows"].as_array() {
        Some(r) => r,
        None => return Vec::new(),
    };

    rows.iter()
        .map(|row| {
            let rate = &row["growth_rate"];
            let display = if rate["kind"] == "initial" {
                labels.initial.to_string()
            } else {
                rate["display"].as_str().unwrap_or("-").to_string()
            };

            vec![
                month_text(row, locale),
                row["units_sold"].as_u64().unwrap_or(0).to_string(),
                display,
            ]
        })
        .collect()
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("No data");
        return;
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(headers.to_vec()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));

    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}

fn print_csv(headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chicken_sales::sales::chicken_sales_2024;

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::parse_from([
            "chicken-sales-cli",
            "chart",
            "bar",
            "--renderer",
            "plotly",
            "--locale",
            "en",
        ]);

        assert_eq!(cli.locale, Locale::En);
        assert!(cli.api_url.is_none());
        assert!(matches!(
            cli.command,
            Commands::Chart {
                kind: ChartKind::Bar,
                renderer: RendererKind::Plotly,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_chart_kind() {
        assert!(Cli::try_parse_from(["chicken-sales-cli", "chart", "pie"]).is_err());
    }

    #[test]
    fn test_growth_rows_use_initial_label() {
        let data = serde_json::to_value(GrowthResponse::new(&chicken_sales_2024(), Locale::Ko))
            .unwrap();
        let rows = growth_rows(&data, Locale::Ko);

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], vec!["1월", "450", "초기"]);
        assert_eq!(rows[6], vec!["7월", "950", "+18.8%"]);
    }

    #[test]
    fn test_growth_rows_relabel_server_data_in_cli_locale() {
        // a server running in Korean, read by an English CLI
        let data = serde_json::to_value(GrowthResponse::new(&chicken_sales_2024(), Locale::Ko))
            .unwrap();
        let rows = growth_rows(&data, Locale::En);

        assert_eq!(rows[0], vec!["Jan", "450", "initial"]);
        assert_eq!(rows[6], vec!["Jul", "950", "+18.8%"]);
    }

    #[test]
    fn test_month_text_falls_back_to_label() {
        let record = serde_json::json!({ "label": "Q1" });
        assert_eq!(month_text(&record, Locale::En), "Q1");

        let record = serde_json::json!({ "month": 13, "label": "13월" });
        assert_eq!(month_text(&record, Locale::En), "13월");
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["chicken-sales-cli", "summary"]);
        assert_eq!(cli.format, OutputFormat::Table);

        let cli = Cli::parse_from(["chicken-sales-cli", "growth", "--format", "csv"]);
        assert_eq!(cli.format, OutputFormat::Csv);

        assert!(Cli::try_parse_from(["chicken-sales-cli", "summary", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_summary_csv_rows() {
        let data = serde_json::to_value(SummaryResponse::new(&chicken_sales_2024(), Locale::En).unwrap())
            .unwrap();
        let rows = summary_csv_rows(&data);

        assert_eq!(rows[0], vec!["total", "8260"]);
        assert_eq!(rows[1], vec!["average", "688"]);
        assert_eq!(rows[4], vec!["best_month", "7"]);
        assert_eq!(rows[5], vec!["worst_month", "1"]);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(3661), "1h 1m");
    }
}

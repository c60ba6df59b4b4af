use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uptime_charts::chart::{ChartConfig, plot_is_it_up};
use uptime_charts::color::parse_css_color;
use uptime_charts::transform::DEFAULT_IGNORED;
use uptime_charts::{Client, Metric, TransformOptions};
use uptime_charts::{stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "uptime-charts",
    version,
    about = "Fetch uptime-monitor latency data & render full and compact charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch measurements and render a full/compact chart pair.
    Plot(PlotArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Get,
    Connect,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Get => Metric::Get,
            MetricArg::Connect => Metric::Connect,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Measurement endpoint URL.
    #[arg(short, long)]
    url: String,
    /// Which latency to chart.
    #[arg(short, long, value_enum, default_value_t = MetricArg::Get)]
    metric: MetricArg,
    /// Full-size chart output (.svg or .png).
    #[arg(long)]
    full: PathBuf,
    /// Compact chart output (.svg or .png).
    #[arg(long)]
    compact: PathBuf,
    /// Canvas width in pixels (height follows each view's aspect ratio).
    #[arg(long, default_value_t = 960)]
    width: u32,
    /// Trailing window in days; 0 shows all points.
    #[arg(long, default_value_t = 14)]
    window_days: i64,
    /// Base series color (#rrggbb or rgb(r, g, b)).
    #[arg(long)]
    base_color: Option<String>,
    /// Locations to leave out, separated by comma or semicolon.
    #[arg(long, default_value_t = DEFAULT_IGNORED.join(","))]
    ignore: String,
    /// Locale for y-axis numbers (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Save plotted datasets to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-location statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 2 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    if args.window_days < 0 {
        bail!("--window-days must not be negative");
    }
    let mut opts = TransformOptions::for_metric(args.metric.into());
    opts.window = match args.window_days {
        0 => None,
        days => match chrono::TimeDelta::try_days(days) {
            Some(w) => Some(w),
            None => bail!("--window-days {} is out of range", days),
        },
    };
    opts.ignore = parse_list(&args.ignore);
    if let Some(c) = args.base_color.as_deref() {
        opts.base_color = parse_css_color(c)?.rgb;
    }

    let config = ChartConfig {
        width: args.width,
        locale: args.locale.clone(),
        ..ChartConfig::default()
    };

    let client = Client::new()?;
    let pair = plot_is_it_up(
        &client,
        &args.url,
        &args.full,
        &args.compact,
        &opts,
        &config,
        chrono::Utc::now(),
    )?;
    if !pair.is_fetched() {
        eprintln!("No data from {}; charts left empty", args.url);
    } else {
        eprintln!(
            "Wrote {} and {}",
            args.full.display(),
            args.compact.display()
        );
    }

    let datasets = &pair.full.datasets;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(datasets, path)?,
            "json" => storage::save_json(datasets, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} series to {}", datasets.len(), path.display());
    }

    if args.stats {
        for s in stats::location_summary(datasets) {
            println!(
                "{}  count={}  min={} max={} mean={} median={}",
                s.label,
                s.count,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}

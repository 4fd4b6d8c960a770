use anyhow::{Context, Result};
use arq_bench_abstract::{HarnessConfig, HarnessConfigOverride, MalformedPolicy};
use arq_bench_harness::{
    Sweep, SweepReport, SystemLauncher, receiver_invocation, sender_invocation, trial_space,
};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Benchmark Go-Back-N and Stop-and-Wait implementations over a fixed grid"
)]
struct Args {
    /// TOML file with harness settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Result log to append to (default: test.out).
    #[arg(long)]
    log: Option<PathBuf>,

    /// Program that runs the protocol executables, e.g. `java`.
    #[arg(long)]
    launcher: Option<String>,

    /// Extra launcher argument placed before the executable name (repeatable).
    #[arg(long = "launcher-arg", allow_hyphen_values = true, requires = "launcher")]
    launcher_args: Vec<String>,

    /// Directory the protocol processes run in.
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Kill a trial's processes after this many milliseconds.
    #[arg(long)]
    trial_timeout_ms: Option<u64>,

    /// Keep going when a sender's output cannot be parsed.
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,

    /// Print the planned invocations without running anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON summary of the sweep.
    #[arg(long)]
    report_out: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("arq-bench starting…");

    let config = args.resolve_config()?;
    let launcher = SystemLauncher::from_config(&config);

    if args.dry_run {
        print_plan(&launcher);
        return Ok(());
    }

    let sweep = Sweep::new(launcher, &config);
    let report = sweep.run(trial_space()).await?;
    log_summary(&report);

    if let Some(path) = &args.report_out {
        write_report(path, &report)?;
    }

    Ok(())
}

impl Args {
    /// Defaults, then the config file, then command-line flags.
    fn resolve_config(&self) -> Result<HarnessConfig> {
        let mut config = HarnessConfig::default();
        if let Some(path) = &self.config {
            load_overrides(path)?.apply_to(&mut config);
        }
        self.overrides().apply_to(&mut config);
        Ok(config)
    }

    fn overrides(&self) -> HarnessConfigOverride {
        let launcher = self.launcher.as_ref().map(|program| {
            std::iter::once(program.clone())
                .chain(self.launcher_args.iter().cloned())
                .collect()
        });

        HarnessConfigOverride {
            log_path: self.log.clone(),
            launcher,
            working_dir: self.workdir.clone(),
            trial_timeout_ms: self.trial_timeout_ms,
            on_malformed: self.skip_malformed.then_some(MalformedPolicy::Skip),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_overrides(path: &Path) -> Result<HarnessConfigOverride> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let overrides: HarnessConfigOverride =
        toml::from_str(&content).context("Failed to parse config file")?;
    Ok(overrides)
}

fn print_plan(launcher: &SystemLauncher) {
    for (index, trial) in trial_space().enumerate() {
        info!("[{}] {}", index + 1, trial);
        info!("    receiver: {}", launcher.render(&receiver_invocation(&trial)));
        info!("    sender:   {}", launcher.render(&sender_invocation(&trial)));
    }
}

fn log_summary(report: &SweepReport) {
    info!(
        "Sweep finished in {} ms | rows written: {} | skipped: {} | abnormal exits: {}",
        report.duration_ms,
        report.rows_written,
        report.skipped.len(),
        report.abnormal_exits
    );
}

fn write_report(path: &Path, report: &SweepReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize sweep report")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;
    Ok(())
}

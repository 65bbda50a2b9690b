use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use glibc_abi_collector::{
    classified_manifests, collect_target_abi, output, AbiError, TargetTable,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version = "1.0.0")]
#[command(about = "Extract glibc ABI descriptions from abilist manifests", long_about = None)]
struct Args {
    /// glibc source tree containing the sysdeps directory
    source: PathBuf,

    /// Directory to write per-target JSON files to
    dest: PathBuf,

    /// Only process the named targets (repeatable); unknown names are fatal
    #[arg(long = "target")]
    targets: Vec<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();

    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let table = TargetTable::builtin().context("loading target table")?;

    // Resolve requested target names up front so a typo fails before any
    // output is written.
    let targets: Vec<&str> = if args.targets.is_empty() {
        table.iter().map(|spec| spec.name).collect()
    } else {
        for name in &args.targets {
            if !table.contains(name) {
                return Err(AbiError::UnknownTarget(name.clone()).into());
            }
        }
        table
            .iter()
            .map(|spec| spec.name)
            .filter(|name| args.targets.iter().any(|t| t == name))
            .collect()
    };

    if !args.quiet {
        println!(
            "{} Scanning manifests under {}",
            "[*]".blue(),
            args.source.display()
        );
    }

    let manifests = classified_manifests(&args.source)
        .with_context(|| format!("scanning {}", args.source.display()))?;

    if !args.quiet {
        println!("{} Found {} manifests", "[+]".green(), manifests.len());
    }

    output::prepare_dest(&args.dest)
        .with_context(|| format!("creating {}", args.dest.display()))?;

    let progress = if args.no_progress || args.quiet {
        None
    } else {
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut empty_targets = 0usize;

    for target in &targets {
        if let Some(ref pb) = progress {
            pb.set_message(target.to_string());
        }

        let abi = collect_target_abi(&table, target, &manifests)
            .with_context(|| format!("resolving ABI for {target}"))?;

        if abi.is_empty() {
            empty_targets += 1;
        }

        output::write_target_abi(&args.dest, target, &abi)
            .with_context(|| format!("writing {target}.json"))?;

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if !args.quiet {
        println!(
            "{} Wrote {} target files to {} in {:.2}s ({} empty)",
            "[+]".green(),
            targets.len(),
            args.dest.display(),
            start_time.elapsed().as_secs_f64(),
            empty_targets,
        );
    }

    Ok(())
}

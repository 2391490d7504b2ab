/* main.rs
 *
 * Copyright 2026 emviolet
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use solimots::bank::{ContentBank, CustomCategories};
use solimots::config::AppConfig;
use solimots::console;
use solimots::engine::progression::Progression;
use solimots::engine::seed_ops::msg_resumed_seed;
use solimots::engine::session::GameSession;
use solimots::game::{DealLayout, Level, Mulberry32};
use solimots::trace;

const USAGE: &str = "Solimots\n\
     solimots [--seed N] [--config PATH]\n\
     solimots --benchmark-levels [--start-seed N] [--attempts N] [--out PATH] [--config PATH]";

#[derive(Debug, Clone)]
struct LevelBenchmarkOptions {
    start_seed: u32,
    attempts: u32,
    out_path: String,
}

impl Default for LevelBenchmarkOptions {
    fn default() -> Self {
        Self {
            start_seed: 1,
            attempts: 1_000,
            out_path: "benchmarks/levels.json".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Play { seed: Option<u32> },
    Benchmark(LevelBenchmarkOptions),
    Help,
}

#[derive(Debug, Clone)]
struct CliArgs {
    mode: Mode,
    config_path: PathBuf,
}

fn parse_u32(value: Option<String>, flag: &str) -> Result<u32, String> {
    value
        .ok_or_else(|| format!("missing value for {flag}"))?
        .replace('_', "")
        .parse::<u32>()
        .map_err(|_| format!("invalid value for {flag}"))
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut idx = 1usize;
    let mut seed = None;
    let mut benchmark = LevelBenchmarkOptions::default();
    let mut benchmark_enabled = false;
    let mut config_path = PathBuf::from("solimots.json");

    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                seed = Some(parse_u32(args.get(idx + 1).cloned(), "--seed")?);
                idx += 2;
            }
            "--config" => {
                config_path = args
                    .get(idx + 1)
                    .map(PathBuf::from)
                    .ok_or_else(|| "missing value for --config".to_string())?;
                idx += 2;
            }
            "--benchmark-levels" => {
                benchmark_enabled = true;
                idx += 1;
            }
            "--start-seed" => {
                benchmark.start_seed = parse_u32(args.get(idx + 1).cloned(), "--start-seed")?;
                idx += 2;
            }
            "--attempts" => {
                benchmark.attempts = parse_u32(args.get(idx + 1).cloned(), "--attempts")?;
                idx += 2;
            }
            "--out" => {
                benchmark.out_path = args
                    .get(idx + 1)
                    .cloned()
                    .ok_or_else(|| "missing value for --out".to_string())?;
                idx += 2;
            }
            "--help" | "-h" => {
                return Ok(CliArgs {
                    mode: Mode::Help,
                    config_path,
                });
            }
            other => return Err(format!("unknown argument {other}\n{USAGE}")),
        }
    }

    let mode = if benchmark_enabled {
        Mode::Benchmark(benchmark)
    } else {
        Mode::Play { seed }
    };
    Ok(CliArgs { mode, config_path })
}

/// Built-in or file bank, plus any playable custom categories.
fn load_bank(config: &AppConfig) -> Result<ContentBank> {
    let bank = match &config.bank_path {
        Some(path) => ContentBank::load_from_path(path)
            .with_context(|| format!("loading category bank {}", path.display()))?,
        None => ContentBank::builtin(),
    };
    let Some(custom_path) = &config.custom_categories_path else {
        return Ok(bank);
    };
    let custom = CustomCategories::load_from_path(custom_path);
    Ok(bank.with_custom(&custom.valid_categories(config.generator.min_items_per_category)))
}

#[derive(Debug, Default, Serialize)]
struct LevelBenchmarkReport {
    version: u32,
    generated_at_unix: u64,
    start_seed: u32,
    attempts: u32,
    generated: u32,
    failed: u32,
    elapsed_seconds: f64,
    levels_per_second: f64,
    column_histogram: BTreeMap<usize, u32>,
    average_cards: f64,
    average_categories: f64,
    average_tableau_cards: f64,
    average_stock_cards: f64,
    average_image_categories: f64,
    short_tableau_levels: u32,
}

fn image_category_count(level: &Level) -> usize {
    level
        .categories
        .iter()
        .filter(|def| {
            level
                .cards
                .iter()
                .any(|card| card.category_id() == def.id && card.image.is_some())
        })
        .count()
}

fn run_level_benchmark(options: &LevelBenchmarkOptions, config: &AppConfig) -> Result<()> {
    let bank = load_bank(config)?;
    let started = Instant::now();
    let mut report = LevelBenchmarkReport {
        version: 1,
        start_seed: options.start_seed,
        attempts: options.attempts,
        ..LevelBenchmarkReport::default()
    };
    let mut totals = [0usize; 5];

    for offset in 0..options.attempts {
        let seed = options.start_seed.wrapping_add(offset);
        let level = match Level::generate(&bank, seed, &config.generator) {
            Ok(level) => level,
            Err(err) => {
                report.failed += 1;
                eprintln!("[bench] seed {seed}: {err}");
                continue;
            }
        };
        report.generated += 1;
        *report
            .column_histogram
            .entry(level.column_count())
            .or_default() += 1;

        let layout = DealLayout::plan(&mut Mulberry32::new(seed), &config.generator);
        if level.tableau_card_count() < layout.tableau_cards() {
            report.short_tableau_levels += 1;
        }

        totals[0] += level.cards.len();
        totals[1] += level.categories.len();
        totals[2] += level.tableau_card_count();
        totals[3] += level.stock.len();
        totals[4] += image_category_count(&level);
    }

    let elapsed = started.elapsed().as_secs_f64();
    let generated = f64::from(report.generated.max(1));
    report.average_cards = totals[0] as f64 / generated;
    report.average_categories = totals[1] as f64 / generated;
    report.average_tableau_cards = totals[2] as f64 / generated;
    report.average_stock_cards = totals[3] as f64 / generated;
    report.average_image_categories = totals[4] as f64 / generated;
    report.elapsed_seconds = elapsed;
    report.levels_per_second = if elapsed > 0.0 {
        f64::from(report.generated) / elapsed
    } else {
        0.0
    };
    report.generated_at_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let payload = serde_json::to_string_pretty(&report)?;
    if let Some(parent) = Path::new(&options.out_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(&options.out_path, payload)
        .with_context(|| format!("writing {}", options.out_path))?;
    eprintln!("Wrote level benchmark: {}", options.out_path);
    Ok(())
}

fn run_play(seed: Option<u32>, config: &AppConfig) -> Result<()> {
    let bank = load_bank(config)?;
    let progression = Progression::load_from_path(&config.progression_path);
    let mut session = GameSession::new(bank, config.generator.clone(), config.session.clone())
        .with_progression(progression);

    if seed.is_none() && session.load_from_path(&config.save_path) {
        if let Some(level) = session.level() {
            println!("{}", msg_resumed_seed(level.seed));
        }
    } else {
        session.new_game(seed).context("dealing the first level")?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    console::run(&mut session, config, stdin.lock(), stdout.lock())?;

    session
        .save_to_path(&config.save_path)
        .with_context(|| format!("writing {}", config.save_path.display()))?;
    session
        .progression()
        .save_to_path(&config.progression_path)
        .with_context(|| format!("writing {}", config.progression_path.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    trace::init();
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let result = AppConfig::load(&cli.config_path)
        .with_context(|| format!("loading config {}", cli.config_path.display()))
        .and_then(|config| match cli.mode {
            Mode::Help => {
                println!("{USAGE}");
                Ok(())
            }
            Mode::Benchmark(options) => run_level_benchmark(&options, &config),
            Mode::Play { seed } => run_play(seed, &config),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

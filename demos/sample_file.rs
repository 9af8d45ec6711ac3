//! Draw samples from weights stored in a CSV file.
//!
//! ```text
//! cargo run --example sample_file -- names.csv [ages.csv] [-n 100000]
//! ```
//!
//! Each line is `id,label,weight`; only the label and weight columns are used.
//! Fields are split on bare commas. Quoted fields are not supported, so a line
//! containing `"` is rejected rather than split in the wrong place.
//! With one file the per-label counts are printed. With two files the two
//! sample streams are zipped into numbered records. Without a file a small
//! built-in distribution is used. Set `RUST_LOG=vose_alias=debug` to see the
//! library's construction logs.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use vose_alias::{AliasTables, build, draw_n, normalize};

const DEFAULT_DRAWS: i64 = 100_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut files = Vec::new();
    let mut draws = DEFAULT_DRAWS;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "-n" {
            let value = args.next().ok_or("-n needs a value")?;
            draws = value.parse()?;
        } else {
            files.push(arg);
        }
    }

    let mut rng = rand::rng();
    match files.as_slice() {
        [] => {
            let tables = AliasTables::from_weights([
                ("Olivia".to_string(), 19.0),
                ("Liam".to_string(), 18.5),
                ("Emma".to_string(), 17.0),
                ("Noah".to_string(), 16.0),
                ("Zelda".to_string(), 0.2),
            ])?;
            report(&tables, &draw_n(&tables, &mut rng, draws)?);
        }
        [single] => {
            let tables = load(single)?;
            let start = Instant::now();
            let samples = draw_n(&tables, &mut rng, draws)?;
            report(&tables, &samples);
            eprintln!("\nsampling took {:?}", start.elapsed());
        }
        [first, second, ..] => {
            let names = draw_n(&load(first)?, &mut rng, draws)?;
            let ages = draw_n(&load(second)?, &mut rng, draws)?;
            for (id, (name, age)) in (100_000_000u64..).zip(names.iter().zip(&ages)) {
                println!("Name: {name}\t\tAge: {age}\t\tID: {id}");
            }
        }
    }
    Ok(())
}

fn load(path: &str) -> Result<AliasTables<String>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let mut weights = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let pair = parse_line(line).map_err(|e| format!("{path}:{}: {e}", line_no + 1))?;
        weights.push(pair);
    }
    Ok(build(&normalize(weights)?)?)
}

fn parse_line(line: &str) -> Result<(String, f64), String> {
    if line.contains('"') {
        return Err("quoted fields are not supported".to_string());
    }
    let cols: Vec<&str> = line.split(',').map(str::trim).collect();
    let [_, label, weight, ..] = cols.as_slice() else {
        return Err("expected id,label,weight".to_string());
    };
    let weight: f64 = weight
        .parse()
        .map_err(|e| format!("bad weight {weight:?}: {e}"))?;
    Ok((label.to_string(), weight))
}

fn report(tables: &AliasTables<String>, samples: &[String]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for s in samples {
        *counts.entry(s.as_str()).or_default() += 1;
    }
    for label in tables.outcomes() {
        let count = counts.get(label.as_str()).copied().unwrap_or(0);
        let percent = 100.0 * count as f64 / samples.len() as f64;
        println!("{label:>16} {count:>9} {percent:>8.3}%");
    }
}

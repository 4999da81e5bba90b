//! lipyantar command line
//!
//! Converts text given as an argument, or read from stdin, with mapping rules
//! from the command line.
//!
//! Usage:
//!   lipyantar --defaults "sak"
//!   echo "xy" | lipyantar --rule x=અ --rule y=ા --json
//!   lipyantar --normalize-only "િક"

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Parser;
use lipyantar::{
    ConvertRequest, ConvertResponse, Converter, MappingRule, Normalizer, TextStatistics,
    default_rules,
};
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "lipyantar")]
#[command(about = "Gujarati text normalizer and rule-based character converter")]
struct Args {
    /// Text to convert; read from stdin when omitted
    text: Option<String>,

    /// Mapping rule `SRC=DST`, evaluated in the order given
    #[arg(short, long = "rule", value_parser = parse_rule)]
    rules: Vec<MappingRule>,

    /// Append the stock rules (s=ક, a=અ, k=ક) after any --rule
    #[arg(short, long)]
    defaults: bool,

    /// Only normalize, ignore all rules
    #[arg(short, long)]
    normalize_only: bool,

    /// Print the result as a JSON response object
    #[arg(short, long)]
    json: bool,

    /// Also print character, word and line counts of the result
    #[arg(short, long)]
    stats: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_rule(spec: &str) -> Result<MappingRule, String> {
    let (source, target) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected SRC=DST, got `{spec}`"))?;
    MappingRule::new(source, target).map_err(|e| e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    #[serde(flatten)]
    response: ConvertResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<TextStatistics>,
}

fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let text = read_input(args.text)?;

    let converted = if args.normalize_only {
        if !args.rules.is_empty() || args.defaults {
            info!("--normalize-only set, rules ignored");
        }
        let converted = Normalizer::default().normalize(text.as_str()).into_owned();
        ConvertResponse {
            original_text: text,
            converted_text: converted,
            rules_applied: 0,
        }
    } else {
        let mut builder = Converter::builder().rules(args.rules);
        if args.defaults {
            builder = builder.rules(default_rules());
        }
        let converter = builder.build();
        debug!(stages = ?converter.stage_names().collect::<Vec<_>>(), "pipeline");
        let request = ConvertRequest::new(text);
        match converter.respond(&request) {
            Ok(response) => response,
            Err(e) => bail!("{e}; pass text as an argument or on stdin"),
        }
    };

    let statistics = args
        .stats
        .then(|| TextStatistics::of(&converted.converted_text));

    if args.json {
        let out = JsonOutput {
            response: converted,
            statistics,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", converted.converted_text);
        if let Some(s) = statistics {
            println!(
                "characters: {}  words: {}  lines: {}",
                s.characters, s.words, s.lines
            );
        }
    }
    Ok(())
}

//! Replays a formset scenario and prints the resulting markup.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use formset::Scenario;
use formset_dom::{HtmlWriter, HtmlWriterOptions, Node};

/// The CLI arguments of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[clap(version, about)]
struct Args {
    /// The scenario file to replay.
    ///
    /// It is a JSON object with `options`, `management`, `rows`, `template`
    /// and `actions`, where actions are `"add"` or `{ "delete": <position> }`.
    #[clap(long, short)]
    input: PathBuf,
    /// Prints a JSON summary of the final state instead of HTML.
    #[clap(long)]
    summary: bool,
    /// Textualizes invalid tags and attributes instead of failing.
    #[clap(long)]
    lenient: bool,
}

fn main() -> anyhow::Result<()> {
    // Start logging
    let _ = {
        use log::LevelFilter::*;
        env_logger::builder()
            .filter_module("formset", Info)
            .filter_module("formset_dom", Info)
            .try_init()
    };

    let args = Args::parse();

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let scenario = Scenario::from_json(&json)
        .with_context(|| format!("failed to parse scenario {}", args.input.display()))?;
    let formset = scenario.run()?;

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&formset.summary())?);
        return Ok(());
    }

    let options = HtmlWriterOptions::default()
        .with_strict(!args.lenient)
        .with_block_newlines(true);
    let mut writer = HtmlWriter::with_options(options);
    writer.write_node(&Node::Fragment(vec![
        formset.management_form().to_node(),
        formset.to_node(),
    ]))?;
    print!("{}", writer.into_string());

    Ok(())
}

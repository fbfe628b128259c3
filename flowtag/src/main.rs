mod aggregator;
mod args;
mod flow_log;
mod lookup;
mod output;
mod parsers;
mod protocol;
mod records;
mod report;
mod tally;
mod tests;

use std::{io, time::Instant};

use aggregator::UNTAGGED;
use anyhow::Context;
use args::{Cli, Config, ExportMethodType, InputConfig, OutputConfig};
use clap::Parser;
use log::{debug, error, info, warn};
use lookup::LookupIndex;
use output::OutputWriter;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // If a config file is provided, load it
    let config: Config = if let Some(config_path) = cli.config_file {
        match confy::load_path::<Config>(&config_path) {
            Ok(cfg_file) => cfg_file,
            Err(e) => {
                error!("Error loading configuration file {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        Config {
            input: cli.input,
            output: cli.output,
        }
    };
    debug!("Running with {:?}", config);

    let start = Instant::now();
    let report = match build_report(&config.input) {
        Ok(report) => report,
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = write_report(&config.output, &report) {
        error!("Error writing output file: {}", e);
        std::process::exit(1);
    }

    info!(
        "Duration: {:.4} seconds",
        Instant::now().duration_since(start).as_secs_f64()
    );

    if config.output.output == ExportMethodType::File {
        println!(
            "Done, the results are written into '{}' file.",
            config.output.export_path
        );
    }
}

/// Loads the lookup table, aggregates the flow log and renders the report.
fn build_report(input: &InputConfig) -> anyhow::Result<String> {
    let index = LookupIndex::from_csv(&input.lookup)
        .with_context(|| format!("failed to load lookup table {}", input.lookup))?;

    debug!("Aggregating flow log in {} mode", input.mode);
    let tallies = flow_log::aggregate_file(&input.flow_logs, &index, input.mode)
        .with_context(|| format!("failed to read flow log {}", input.flow_logs))?;

    debug_assert_eq!(tallies.port_protocol_counts.total(), tallies.accepted);
    if tallies.port_protocol_counts.is_empty() {
        warn!("No flow records were accepted from {}", input.flow_logs);
    }
    info!(
        "{} distinct tags, {} untagged, {} port/protocol combinations",
        tallies.tag_counts.len(),
        tallies.tag_counts.get(UNTAGGED),
        tallies.port_protocol_counts.len()
    );

    Ok(report::render(&tallies))
}

fn write_report(output: &OutputConfig, report: &str) -> io::Result<()> {
    let mut output_writer = OutputWriter::new(output.output, &output.export_path)?;
    output_writer.write_report(report)?;
    output_writer.flush_and_close()
}

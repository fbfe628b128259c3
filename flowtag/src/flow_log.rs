use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};

use log::{debug, info};

use crate::{
    aggregator::{FlowAggregator, Tallies},
    args::TallyMode,
    lookup::LookupIndex,
};

/// Aggregates every line of a flow log file.
pub fn aggregate_file(path: &str, index: &LookupIndex, mode: TallyMode) -> io::Result<Tallies> {
    debug!("Opening the flow log: {:?} ...", path);
    let file = File::open(path)?;
    let tallies = aggregate_reader(BufReader::new(file), index, mode)?;
    info!(
        "Processed {} flow records from {} ({} malformed lines skipped)",
        tallies.accepted, path, tallies.skipped
    );
    Ok(tallies)
}

pub fn aggregate_reader<R: BufRead>(
    reader: R,
    index: &LookupIndex,
    mode: TallyMode,
) -> io::Result<Tallies> {
    let mut aggregator = FlowAggregator::new(index, mode);
    for line in reader.lines() {
        aggregator.process_line(&line?);
    }
    Ok(aggregator.finish())
}

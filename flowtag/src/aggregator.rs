use log::debug;

use crate::{
    args::TallyMode, lookup::LookupIndex, protocol::Protocol, records::flow_record::FlowRecord,
    tally::Tally,
};

/// Tag given to flows that match no lookup row or use an unknown protocol.
pub const UNTAGGED: &str = "Untagged";

/// A destination port together with the protocol it was seen on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortProtocol {
    pub port: String,
    pub protocol: Protocol,
}

/// Final counts of an aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Tallies {
    pub tag_counts: Tally<String>,
    pub port_protocol_counts: Tally<PortProtocol>,
    /// Lines that had enough fields to be counted.
    pub accepted: u64,
    /// Lines dropped for having too few fields.
    pub skipped: u64,
}

/// Tags flow records against a [`LookupIndex`] and counts the results.
///
/// The aggregator owns its counts until [`FlowAggregator::finish`] hands
/// them back.
pub struct FlowAggregator<'a> {
    index: &'a LookupIndex,
    mode: TallyMode,
    tallies: Tallies,
}

impl<'a> FlowAggregator<'a> {
    pub fn new(index: &'a LookupIndex, mode: TallyMode) -> Self {
        FlowAggregator {
            index,
            mode,
            tallies: Tallies::default(),
        }
    }

    /// Processes one raw flow log line.
    ///
    /// ### Returns
    ///
    /// `true` if the line was counted, `false` if it was dropped as malformed.
    pub fn process_line(&mut self, line: &str) -> bool {
        match FlowRecord::parse(line) {
            Some(record) => {
                self.process_record(&record);
                true
            }
            None => {
                debug!("Skipping malformed flow line: {:?}", line);
                self.tallies.skipped += 1;
                false
            }
        }
    }

    pub fn process_record(&mut self, record: &FlowRecord) {
        let protocol = Protocol::from_number(record.protocol_number);
        let tag_counts = &mut self.tallies.tag_counts;

        if protocol == Protocol::Unknown {
            tag_counts.increment(UNTAGGED);
        } else {
            let fallback = [UNTAGGED.to_string()];
            let tags = self
                .index
                .get(record.dst_port, protocol.as_str())
                .unwrap_or(&fallback);

            for tag in tags {
                tag_counts.increment(tag.as_str());
            }

            if self.mode == TallyMode::Legacy {
                let untagged = tags.iter().filter(|tag| tag.as_str() == UNTAGGED).count() as u64;
                if untagged > 0 {
                    tag_counts.add(UNTAGGED, untagged);
                }
            }
        }

        self.tallies.port_protocol_counts.increment(&PortProtocol {
            port: record.dst_port.to_string(),
            protocol,
        });
        self.tallies.accepted += 1;
    }

    pub fn finish(self) -> Tallies {
        self.tallies
    }
}

use crate::aggregator::{PortProtocol, Tallies};

/// Orders ports numerically. Ports that are not a number go last.
fn port_sort_key(port: &str) -> (bool, u64) {
    match port.parse::<u64>() {
        Ok(number) => (false, number),
        Err(_) => (true, 0),
    }
}

/// Tags by descending count. Equal counts keep the order tags were first seen.
pub fn sorted_tag_counts(tallies: &Tallies) -> Vec<(&str, u64)> {
    let mut tags: Vec<(&str, u64)> = tallies
        .tag_counts
        .iter()
        .map(|(tag, count)| (tag.as_str(), count))
        .collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1));
    tags
}

/// Port/protocol pairs by ascending numeric port. The protocol is not a sort
/// key, so pairs on the same port keep the order they were first seen.
pub fn sorted_port_protocol_counts(tallies: &Tallies) -> Vec<(&PortProtocol, u64)> {
    let mut pairs: Vec<(&PortProtocol, u64)> = tallies.port_protocol_counts.iter().collect();
    pairs.sort_by_key(|(pair, _)| port_sort_key(&pair.port));
    pairs
}

/// Renders the two-section report.
pub fn render(tallies: &Tallies) -> String {
    let mut report = String::new();

    report.push_str("Tag Counts:\n\n");
    report.push_str("Tag,Count\n");
    for (tag, count) in sorted_tag_counts(tallies) {
        report.push_str(&format!("{},{}\n", tag, count));
    }

    report.push_str("\nPort/Protocol Combination Counts:\n\n");
    report.push_str("Port,Protocol,Count\n");
    for (pair, count) in sorted_port_protocol_counts(tallies) {
        report.push_str(&format!("{},{},{}\n", pair.port, pair.protocol, count));
    }

    report
}

mod aggregator_test;

/// Builds a 14-field flow log line with the given destination port and
/// protocol number in positions 5 and 7.
#[cfg(test)]
pub fn flow_line(dst_port: &str, protocol_number: &str) -> String {
    format!(
        "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 {} 49153 {} 25 20000 1620140761 1620140821 ACCEPT OK",
        dst_port, protocol_number
    )
}

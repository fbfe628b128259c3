#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::aggregator::{FlowAggregator, PortProtocol, Tallies, UNTAGGED};
    use crate::args::TallyMode;
    use crate::lookup::LookupIndex;
    use crate::protocol::Protocol;
    use crate::records::lookup_record::LookupRecord;
    use crate::tests::flow_line;

    fn setup_index(rows: &[(&str, &str, &str)]) -> LookupIndex {
        LookupIndex::from_records(rows.iter().map(|(port, protocol, tag)| LookupRecord {
            dst_port: port.to_string(),
            protocol: protocol.to_string(),
            tag: tag.to_string(),
        }))
    }

    fn aggregate(index: &LookupIndex, mode: TallyMode, flows: &[(&str, &str)]) -> Tallies {
        let mut aggregator = FlowAggregator::new(index, mode);
        for (port, protocol) in flows {
            assert!(aggregator.process_line(&flow_line(port, protocol)));
        }
        aggregator.finish()
    }

    fn pair(port: &str, protocol: Protocol) -> PortProtocol {
        PortProtocol {
            port: port.to_string(),
            protocol,
        }
    }

    #[test]
    fn test_example_scenario() {
        let index = setup_index(&[("25", "tcp", "mail"), ("68", "udp", "dhcp")]);
        let tallies = aggregate(
            &index,
            TallyMode::Corrected,
            &[("25", "6"), ("68", "17"), ("99", "6")],
        );

        assert_eq!(tallies.tag_counts.get("mail"), 1);
        assert_eq!(tallies.tag_counts.get("dhcp"), 1);
        assert_eq!(tallies.tag_counts.get(UNTAGGED), 1);
        assert_eq!(tallies.tag_counts.len(), 3);

        assert_eq!(tallies.port_protocol_counts.get(&pair("25", Protocol::Tcp)), 1);
        assert_eq!(tallies.port_protocol_counts.get(&pair("68", Protocol::Udp)), 1);
        assert_eq!(tallies.port_protocol_counts.get(&pair("99", Protocol::Tcp)), 1);
        assert_eq!(tallies.accepted, 3);
        assert_eq!(tallies.skipped, 0);
    }

    #[test]
    fn test_protocol_must_match_lookup() {
        let index = setup_index(&[("53", "udp", "dns")]);
        let tallies = aggregate(&index, TallyMode::Corrected, &[("53", "6"), ("53", "17")]);

        assert_eq!(tallies.tag_counts.get("dns"), 1);
        assert_eq!(tallies.tag_counts.get(UNTAGGED), 1);
        assert_eq!(tallies.port_protocol_counts.get(&pair("53", Protocol::Tcp)), 1);
        assert_eq!(tallies.port_protocol_counts.get(&pair("53", Protocol::Udp)), 1);
    }

    #[test]
    fn test_multiple_tags_for_one_key() {
        let index = setup_index(&[("443", "tcp", "https"), ("443", "TCP", "web")]);
        let tallies = aggregate(&index, TallyMode::Corrected, &[("443", "6"), ("443", "6")]);

        assert_eq!(tallies.tag_counts.get("https"), 2);
        assert_eq!(tallies.tag_counts.get("web"), 2);
        assert_eq!(tallies.tag_counts.get(UNTAGGED), 0);
        assert_eq!(tallies.port_protocol_counts.get(&pair("443", Protocol::Tcp)), 2);
        assert_eq!(tallies.port_protocol_counts.len(), 1);
    }

    #[test]
    fn test_unknown_protocol_counts_untagged_once() {
        // A lookup row for the port must not matter when the protocol is unknown
        let index = setup_index(&[("25", "tcp", "mail")]);
        for mode in [TallyMode::Corrected, TallyMode::Legacy] {
            let tallies = aggregate(&index, mode, &[("25", "47")]);
            assert_eq!(tallies.tag_counts.get(UNTAGGED), 1);
            assert_eq!(tallies.tag_counts.get("mail"), 0);
            assert_eq!(
                tallies.port_protocol_counts.get(&pair("25", Protocol::Unknown)),
                1
            );
        }
    }

    #[test]
    fn test_legacy_mode_double_counts_unmatched() {
        let index = setup_index(&[("25", "tcp", "mail")]);
        let tallies = aggregate(&index, TallyMode::Legacy, &[("25", "6"), ("99", "6")]);

        assert_eq!(tallies.tag_counts.get("mail"), 1);
        assert_eq!(tallies.tag_counts.get(UNTAGGED), 2);
        assert_eq!(tallies.port_protocol_counts.total(), 2);
    }

    #[test]
    fn test_literal_untagged_lookup_tag() {
        let index = setup_index(&[("8080", "tcp", "Untagged"), ("8080", "tcp", "proxy")]);

        let corrected = aggregate(&index, TallyMode::Corrected, &[("8080", "6")]);
        assert_eq!(corrected.tag_counts.get(UNTAGGED), 1);
        assert_eq!(corrected.tag_counts.get("proxy"), 1);

        let legacy = aggregate(&index, TallyMode::Legacy, &[("8080", "6")]);
        assert_eq!(legacy.tag_counts.get(UNTAGGED), 2);
        assert_eq!(legacy.tag_counts.get("proxy"), 1);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let index = setup_index(&[("25", "tcp", "mail")]);
        let mut aggregator = FlowAggregator::new(&index, TallyMode::Corrected);

        assert!(!aggregator.process_line("2 123456789012 eni-1 10.0.0.1 10.0.0.2 25 49153 6"));
        assert!(!aggregator.process_line(""));
        assert!(aggregator.process_line(&flow_line("25", "6")));

        let tallies = aggregator.finish();
        assert_eq!(tallies.accepted, 1);
        assert_eq!(tallies.skipped, 2);
        assert_eq!(tallies.tag_counts.get("mail"), 1);
        assert_eq!(tallies.tag_counts.total(), 1);
        assert_eq!(tallies.port_protocol_counts.total(), 1);
    }

    fn flow_strategy() -> impl Strategy<Value = (u16, &'static str, bool)> {
        (
            0u16..200,
            prop::sample::select(vec!["1", "6", "17", "2", "-"]),
            any::<bool>(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_every_accepted_record_counts_once(
            flows in prop::collection::vec(flow_strategy(), 0..50),
            legacy in any::<bool>(),
        ) {
            let index = setup_index(&[("25", "tcp", "mail"), ("53", "udp", "dns"), ("53", "udp", "Untagged")]);
            let mode = if legacy { TallyMode::Legacy } else { TallyMode::Corrected };
            let mut aggregator = FlowAggregator::new(&index, mode);

            let mut expected_accepted = 0u64;
            for (port, protocol, malformed) in &flows {
                let line = flow_line(&port.to_string(), protocol);
                let line = if *malformed {
                    line.split_whitespace().take(10).collect::<Vec<_>>().join(" ")
                } else {
                    expected_accepted += 1;
                    line
                };
                aggregator.process_line(&line);
            }

            let tallies = aggregator.finish();
            prop_assert_eq!(tallies.accepted, expected_accepted);
            prop_assert_eq!(tallies.port_protocol_counts.total(), expected_accepted);
            prop_assert!(tallies.tag_counts.total() >= expected_accepted);
        }

        #[test]
        fn prop_unresolved_flows_raise_untagged(port in 1000u16..2000, protocol in prop::sample::select(vec!["1", "6", "17", "99"])) {
            let index = setup_index(&[("25", "tcp", "mail")]);
            let mut aggregator = FlowAggregator::new(&index, TallyMode::Corrected);
            aggregator.process_line(&flow_line(&port.to_string(), protocol));

            let tallies = aggregator.finish();
            prop_assert_eq!(tallies.tag_counts.get(UNTAGGED), 1);
        }
    }
}

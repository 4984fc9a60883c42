use portcheck::bandwidth::{self, report};
use portcheck::verdict::{evaluate_bandwidth, Verdict};
use portcheck::{BandwidthTestResult, Thresholds};

fn fixture_bandwidth_full() -> String {
    r#"
                status: done testing
              duration: 30s
            tx-current: 941.2Mbps
  tx-10-second-average: 940.5Mbps
      tx-total-average: 938.1Mbps
            rx-current: 930.4Mbps
  rx-10-second-average: 929.9Mbps
      rx-total-average: 925Mbps
          lost-packets: 17
           random-data: no
             direction: both
               tx-size: 1500
               rx-size: 1500
      connection-count: 20
        local-cpu-load: 57%
       remote-cpu-load: 43%
    "#
    .to_string()
}

#[test]
fn test_bandwidth_full_parse() {
    let result = bandwidth::parse(&fixture_bandwidth_full()).expect("Parse failed");

    assert_eq!(
        result,
        BandwidthTestResult {
            status: "done testing".to_string(),
            duration: "30s".to_string(),
            tx_current: 941.2,
            tx_average_10s: 940.5,
            tx_average_total: 938.1,
            rx_current: 930.4,
            rx_average_10s: 929.9,
            rx_average_total: 925.0,
            lost_packets: 17,
            random_data_marker: "no".to_string(),
            direction: "both".to_string(),
            tx_size_bytes: 1500,
            rx_size_bytes: 1500,
            connection_count: 20,
            local_cpu_load: "57%".to_string(),
            remote_cpu_load: "43%".to_string(),
        }
    );
}

#[test]
fn test_streamed_blocks_keep_latest_values() {
    let raw = "status: running\ntx-10-second-average: 100Mbps\nlost-packets: 1\n\
               status: running\ntx-10-second-average: 512.5Mbps\nlost-packets: 3\n";
    let result = bandwidth::parse(raw).expect("Parse failed");
    assert_eq!(result.tx_average_10s, 512.5);
    assert_eq!(result.lost_packets, 3);
}

#[test]
fn test_unknown_lines_and_noise() {
    let raw = "firmware: 7.1\n-- [Q quit|D dump|C-z pause]\ntx-10-second-average: 155.3kbps\n";
    let result = bandwidth::parse(raw).expect("Parse failed");
    assert_eq!(result.tx_average_10s, 155.3);
    assert!(result.tx_average_ok());
}

#[test]
fn test_fail_fast_on_bad_number() {
    let raw = "lost-packets: 42\ntx-current: ???\nrx-current: 10Mbps\n";
    let err = bandwidth::parse(raw).unwrap_err();
    assert!(err.is_numeric());
    assert!(err.to_string().contains("tx-current"));
}

#[test]
fn test_report_for_full_capture() {
    let result = bandwidth::parse(&fixture_bandwidth_full()).unwrap();
    assert_eq!(
        report::render(&result),
        "Packet loss OK 17\nTX-Average OK 940.5\nRX-Average OK 929.9\n"
    );
}

#[test]
fn test_threshold_boundaries() {
    let t = Thresholds::default();
    let at_limit = BandwidthTestResult {
        lost_packets: 2500,
        tx_average_10s: 150.0,
        rx_average_10s: 150.0,
        ..Default::default()
    };
    let v = evaluate_bandwidth(&at_limit, &t);
    assert_eq!(
        (v.packet_loss, v.tx_average, v.rx_average),
        (Verdict::Nok, Verdict::Nok, Verdict::Nok)
    );

    let inside = BandwidthTestResult {
        lost_packets: 2499,
        tx_average_10s: 150.01,
        rx_average_10s: 150.01,
        ..Default::default()
    };
    assert!(evaluate_bandwidth(&inside, &t).all_ok());
}

#[test]
fn test_parse_is_idempotent() {
    let raw = fixture_bandwidth_full();
    assert_eq!(bandwidth::parse(&raw).unwrap(), bandwidth::parse(&raw).unwrap());
}

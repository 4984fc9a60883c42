//! RouterOS command lines issued by the workflow.

use anyhow::Result;

use crate::config::BandwidthTestConfig;

/// Reject anything that would not survive as a single CLI token.
fn validate_token(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{what} cannot be empty");
    }
    if value.starts_with('-') {
        anyhow::bail!("{what} cannot start with hyphen");
    }
    if value
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '/' | '.' | ':'))
    {
        anyhow::bail!("{what} {value:?} contains invalid characters");
    }
    Ok(())
}

pub fn validate_port(port: &str) -> Result<()> {
    validate_token("Port", port)
}

pub fn cable_test_command(port: &str) -> Result<String> {
    validate_port(port)?;
    Ok(format!("/interface ethernet cable-test {port} once"))
}

pub fn bandwidth_test_command(cfg: &BandwidthTestConfig) -> Result<String> {
    validate_token("Peer address", &cfg.peer_address)?;
    validate_token("Password", &cfg.password)?;
    validate_token("Direction", &cfg.direction)?;
    validate_token("Duration", &cfg.duration)?;
    Ok(format!(
        "/tool bandwidth-test {} password={} direction={} duration={}",
        cfg.peer_address, cfg.password, cfg.direction, cfg.duration
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cable_test_command() {
        assert_eq!(
            cable_test_command("ether3").unwrap(),
            "/interface ethernet cable-test ether3 once"
        );
        assert!(cable_test_command("sfp-sfpplus1").is_ok());
    }

    #[test]
    fn test_port_validation() {
        assert!(cable_test_command("").is_err());
        assert!(cable_test_command("-ether3").is_err());
        assert!(cable_test_command("ether3 once; /system reboot").is_err());
    }

    #[test]
    fn test_bandwidth_test_command_defaults() {
        assert_eq!(
            bandwidth_test_command(&BandwidthTestConfig::default()).unwrap(),
            "/tool bandwidth-test 192.168.88.1 password=admin direction=both duration=30s"
        );
    }

    #[test]
    fn test_bandwidth_test_command_accepts_ipv6_peer() {
        let cfg = BandwidthTestConfig {
            peer_address: "fd00::1".to_string(),
            ..Default::default()
        };
        assert!(bandwidth_test_command(&cfg).unwrap().contains("bandwidth-test fd00::1 "));
    }

    #[test]
    fn test_bandwidth_test_command_rejects_injected_arguments() {
        let chained = BandwidthTestConfig {
            peer_address: "10.0.0.1; /system reboot".to_string(),
            ..Default::default()
        };
        let err = bandwidth_test_command(&chained).unwrap_err();
        assert!(err.to_string().contains("Peer address"));

        for cfg in [
            BandwidthTestConfig {
                password: "admin direction=receive".to_string(),
                ..Default::default()
            },
            BandwidthTestConfig {
                direction: String::new(),
                ..Default::default()
            },
            BandwidthTestConfig {
                duration: "-30s".to_string(),
                ..Default::default()
            },
        ] {
            assert!(bandwidth_test_command(&cfg).is_err(), "{cfg:?}");
        }
    }
}

//! `bgfx-vendor hosts` — list the host table.

use anyhow::Result;
use bgfx_vendor_targets::{detect_host, HostConfig, HOST_CONFIGS};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for `hosts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Serialize)]
struct HostListing {
    detected: Option<&'static str>,
    hosts: &'static [HostConfig],
}

/// List every host and the targets it builds.
pub fn list(format: Format) -> Result<()> {
    let detected = detect_host();
    match format {
        Format::Human => {
            println!("Hosts:");
            println!();
            for host in HOST_CONFIGS {
                let marker = if Some(host.name) == detected { "*" } else { " " };
                println!("{marker} {:<14} {}", host.name, host.targets.join(", "));
            }
            println!();
            println!("* = this machine. Use 'bgfx-vendor --target <host>' to build.");
        }
        Format::Json => {
            println!("{}", render_json(detected)?);
        }
    }
    Ok(())
}

fn render_json(detected: Option<&'static str>) -> Result<String> {
    let listing = HostListing {
        detected,
        hosts: HOST_CONFIGS,
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_and_json_listings_run() {
        list(Format::Human).unwrap();
        list(Format::Json).unwrap();
    }

    #[test]
    fn json_contains_every_host() {
        let json = render_json(Some("macos")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["detected"], "macos");
        let hosts = value["hosts"].as_array().unwrap();
        assert_eq!(hosts.len(), 3);
        assert_eq!(hosts[0]["name"], "win-x86_64");
        assert_eq!(hosts[0]["targets"][0], "windows-x64");
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Topodraw CLI entrypoint.
//!
//! By default this serves MCP over stdio. `serve --http-port <port>` serves streamable
//! HTTP at `http://127.0.0.1:<port>/mcp` instead, and `render` draws one diagram without
//! an MCP client.

use std::error::Error;
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use log::{debug, error, info, LevelFilter};

use topodraw::config::{load_config, AppConfig};
use topodraw::driver::DiagramDriver;
use topodraw::layout::Direction;
use topodraw::mcp::{CloudDiagramParams, ClusterDiagramParams, TopodrawMcp};
use topodraw::model::{ComponentDescriptor, DiagramRequest};
use topodraw::registry::Platform;
use topodraw::render::ImageFormat;

#[derive(Debug, Parser)]
#[command(name = "topodraw", version, about = "Topology diagrams for MCP clients")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level written to stderr (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Directory for rendered images
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Image format: png or svg
    #[arg(long, global = true)]
    format: Option<ImageFormat>,

    /// Layout direction: LR or TB
    #[arg(long, global = true)]
    direction: Option<Direction>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Command {
    /// Serve MCP over stdio, or over streamable HTTP with --http-port
    Serve {
        /// Port on 127.0.0.1 (0 picks an ephemeral port)
        #[arg(long)]
        http_port: Option<u16>,
    },
    /// Draw one diagram and print the status text
    Render {
        /// Tool name, e.g. build-cluster-diagram or build-aws-diagram
        #[arg(long)]
        tool: String,

        /// JSON file holding the tool arguments
        #[arg(long, conflicts_with = "components")]
        request: Option<PathBuf>,

        /// Diagram name
        #[arg(long)]
        name: Option<String>,

        /// Component shorthand type:name[:replicas], repeatable
        #[arg(long = "component", value_name = "TYPE:NAME[:REPLICAS]")]
        components: Vec<ComponentDescriptor>,
    },
}

impl Args {
    fn app_config(&self) -> Result<AppConfig, Box<dyn Error>> {
        let config = load_config(self.config.as_deref())?;
        let config = config.with_overrides(self.output_dir.clone(), self.format, self.direction);
        config.validate()?;
        Ok(config)
    }
}

fn read_request(
    platform: Platform,
    path: Option<&PathBuf>,
    name: Option<String>,
    components: Vec<ComponentDescriptor>,
) -> Result<DiagramRequest, Box<dyn Error>> {
    let mut request = match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            match platform {
                Platform::Kubernetes => {
                    serde_json::from_str::<ClusterDiagramParams>(&json)?.into_request()
                }
                Platform::Aws | Platform::Gcp => {
                    serde_json::from_str::<CloudDiagramParams>(&json)?.into_request(platform)
                }
            }
        }
        None => DiagramRequest {
            name: platform.default_diagram_name().to_owned(),
            components,
            ..DiagramRequest::default()
        },
    };
    if let Some(name) = name {
        request.name = name;
    }
    Ok(request)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.app_config()?;
    debug!(config:?; "effective configuration");
    let driver = DiagramDriver::from_config(&config);

    match args.command.unwrap_or(Command::Serve { http_port: None }) {
        Command::Serve { http_port } => {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            let mcp = TopodrawMcp::new(driver);
            runtime.block_on(async move {
                match http_port {
                    Some(port) => {
                        mcp.serve_http(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await?
                    }
                    None => mcp.serve_stdio().await?,
                }
                Ok::<(), Box<dyn Error>>(())
            })?;
        }
        Command::Render { tool, request, name, components } => {
            let platform = Platform::from_tool_name(&tool)
                .ok_or_else(|| format!("unknown tool: {tool}"))?;
            let request = read_request(platform, request.as_ref(), name, components)?;
            let rendered = driver.draw_platform(platform, &request)?;
            println!("{}", rendered.status_text());
            println!("{}", rendered.path.display());
        }
    }
    Ok(())
}

fn log_level(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {raw}. Using 'warn' instead.");
        LevelFilter::Warn
    })
}

fn main() {
    let args = Args::parse();

    let level = log_level(&args.log_level);
    env_logger::Builder::from_env(env_logger::Env::default()).filter_level(level).init();

    info!(log_level:? = level; "starting topodraw");

    if let Err(err) = run(args) {
        error!("{err}");
        eprintln!("topodraw: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("topodraw").chain(args.iter().copied()))
            .expect("args")
    }

    #[test]
    fn no_args_serves_stdio_with_warn_logging() {
        let args = parse(&[]);
        assert_eq!(args.command, None);
        assert_eq!(log_level(&args.log_level), LevelFilter::Warn);
        assert_eq!(args.format, None);
    }

    #[test]
    fn parses_http_port() {
        let args = parse(&["serve", "--http-port", "0"]);
        assert_eq!(args.command, Some(Command::Serve { http_port: Some(0) }));
    }

    #[test]
    fn parses_global_overrides_after_subcommand() {
        let args = parse(&["serve", "--format", "svg", "--direction", "TB", "--log-level", "debug"]);
        assert_eq!(args.format, Some(ImageFormat::Svg));
        assert_eq!(args.direction, Some(Direction::TopToBottom));
        assert_eq!(log_level(&args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn invalid_log_level_falls_back_to_warn() {
        assert_eq!(log_level("chatty"), LevelFilter::Warn);
        assert_eq!(log_level("TRACE"), LevelFilter::Trace);
    }

    #[test]
    fn parses_component_shorthand() {
        let args = parse(&[
            "render",
            "--tool",
            "build-cluster-diagram",
            "--component",
            "deployment:api:3",
            "--component",
            "service:api-svc",
        ]);
        let Some(Command::Render { tool, components, request, .. }) = args.command else {
            panic!("expected render");
        };
        assert_eq!(tool, "build-cluster-diagram");
        assert_eq!(request, None);
        assert_eq!(components[0], ComponentDescriptor::new("deployment", "api").with_replicas(3));
        assert_eq!(components[1].name, "api-svc");
    }

    #[test]
    fn rejects_bad_replicas_and_unknown_formats() {
        let shorthand = ["render", "--tool", "build-aws-diagram", "--component", "ec2:web:many"];
        assert!(Args::try_parse_from(std::iter::once("topodraw").chain(shorthand)).is_err());
        assert!(Args::try_parse_from(["topodraw", "--format", "gif"]).is_err());
    }

    #[test]
    fn rejects_request_file_with_components() {
        let result = Args::try_parse_from([
            "topodraw",
            "render",
            "--tool",
            "build-aws-diagram",
            "--request",
            "r.json",
            "--component",
            "ec2:web",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn reads_cloud_request_files() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(
            br#"{"components":[{"type":"ec2","name":"web"}],"vpcs":[{"name":"main","components":["web"]}]}"#,
        )
        .expect("write");

        let request =
            read_request(Platform::Aws, Some(&file.path().to_path_buf()), None, Vec::new())
                .expect("request");
        assert_eq!(request.name, "aws-architecture");
        assert_eq!(request.groups.len(), 1);

        let named = read_request(
            Platform::Gcp,
            Some(&file.path().to_path_buf()),
            Some("renamed".to_owned()),
            Vec::new(),
        )
        .expect("request");
        assert_eq!(named.name, "renamed");
    }

    #[test]
    fn shorthand_requests_use_the_platform_default_name() {
        let request = read_request(
            Platform::Kubernetes,
            None,
            None,
            vec![ComponentDescriptor::new("pod", "p")],
        )
        .expect("request");
        assert_eq!(request.name, "k8s-architecture");
        assert_eq!(request.components.len(), 1);
    }
}

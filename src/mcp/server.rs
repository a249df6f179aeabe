// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;

use crate::driver::{DiagramDriver, DriverError};
use crate::model::DiagramRequest;
use crate::registry::Platform;

use super::types::*;

/// MCP tool server drawing cluster and cloud diagrams.
///
/// Calls are serialised through one lock around the driver, so two calls naming the
/// same diagram never race on its output file.
#[derive(Clone)]
pub struct TopodrawMcp {
    driver: Arc<Mutex<DiagramDriver>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TopodrawMcp {
    pub fn new(driver: DiagramDriver) -> Self {
        Self { driver: Arc::new(Mutex::new(driver)), tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Serves streamable HTTP at `http://<addr>/mcp` until the listener fails.
    pub async fn serve_http(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!(addr = listener.local_addr()?.to_string(); "serving MCP over HTTP at /mcp");

        let config =
            StreamableHttpServerConfig { stateful_mode: true, ..StreamableHttpServerConfig::default() };
        let session_manager = Arc::new(LocalSessionManager::default());
        let service = StreamableHttpService::new(move || Ok(self.clone()), session_manager, config);

        let router = Router::new().nest_service("/mcp", service);
        axum::serve(listener, router).await
    }

    async fn draw(
        &self,
        platform: Platform,
        request: DiagramRequest,
    ) -> Result<CallToolResult, ErrorData> {
        let driver = self.driver.lock().await;
        let rendered = driver.draw_platform(platform, &request).map_err(|err| {
            driver_error(err, platform, &request)
        })?;

        let image = BASE64.encode(&rendered.bytes);
        Ok(CallToolResult::success(vec![
            Content::text(rendered.status_text()),
            Content::image(image, rendered.format.mime_type()),
        ]))
    }

    #[tool(
        name = "build-cluster-diagram",
        description = "Draw a Kubernetes cluster diagram. Components are {type, name, replicas?} with types such as deployment, statefulset, daemonset, job, pod, service, ingress, pvc, pv, storageclass, configmap, secret, hpa, replicaset. Optional clusters group components by name; connections are {from, to, label?}. Returns a status message and the rendered image."
    )]
    async fn build_cluster_diagram(
        &self,
        params: Parameters<ClusterDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.draw(Platform::Kubernetes, params.0.into_request()).await
    }

    #[tool(
        name = "build-cloud-a-diagram",
        description = "Draw an AWS architecture diagram. Components are {type, name} with types such as ec2, ecs, eks, lambda, rds, dynamodb, elasticache, redshift, s3, ebs, efs, elb, alb, nlb, cloudfront, route53, vpc, sqs, sns, eventbridge. Optional vpcs group components by name; connections are {from, to, label?}. Returns a status message and the rendered image."
    )]
    async fn build_cloud_a_diagram(
        &self,
        params: Parameters<CloudDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.draw(Platform::Aws, params.0.into_request(Platform::Aws)).await
    }

    #[tool(
        name = "build-cloud-b-diagram",
        description = "Draw a GCP architecture diagram. Components are {type, name} with types such as gce, gke, computeengine, functions, sql, firestore, bigtable, spanner, loadbalancing, dns, vpc, gcs, persistentdisk, bigquery, dataflow, pubsub. Optional vpcs group components by name; connections are {from, to, label?}. Returns a status message and the rendered image."
    )]
    async fn build_cloud_b_diagram(
        &self,
        params: Parameters<CloudDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.draw(Platform::Gcp, params.0.into_request(Platform::Gcp)).await
    }

    #[tool(
        name = "build-kubernetes-diagram",
        description = "Alias of build-cluster-diagram."
    )]
    async fn build_kubernetes_diagram(
        &self,
        params: Parameters<ClusterDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.build_cluster_diagram(params).await
    }

    #[tool(name = "build-aws-diagram", description = "Alias of build-cloud-a-diagram.")]
    async fn build_aws_diagram(
        &self,
        params: Parameters<CloudDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.build_cloud_a_diagram(params).await
    }

    #[tool(name = "build-gcp-diagram", description = "Alias of build-cloud-b-diagram.")]
    async fn build_gcp_diagram(
        &self,
        params: Parameters<CloudDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.build_cloud_b_diagram(params).await
    }
}

fn driver_error(err: DriverError, platform: Platform, request: &DiagramRequest) -> ErrorData {
    log::warn!(tool = platform.tool_name(), diagram = request.name.as_str(); "tool call failed: {err}");
    ErrorData::internal_error(
        err.to_string(),
        Some(serde_json::json!({ "tool": platform.tool_name(), "name": request.name })),
    )
}

#[tool_handler]
impl ServerHandler for TopodrawMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Topodraw architecture diagram server (tools: build-cluster-diagram, build-cloud-a-diagram, build-cloud-b-diagram; aliases: build-kubernetes-diagram, build-aws-diagram, build-gcp-diagram). Each call returns a status text followed by the rendered image. Unknown component types and connections to unknown names are skipped and listed in the status text."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use auditrs::application::pipeline_factory::build_pipeline;
use auditrs::config::settings::Settings;
use auditrs::infrastructure::metrics;
use auditrs::presentation::routes;
use auditrs::utils::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting auditrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.sanitizer.allow_private_hosts {
        warn!("Private host protection is disabled; do not run this configuration in production");
    }

    // 3. Initialize Prometheus Metrics
    if settings.metrics.enabled {
        let addr: SocketAddr = settings.metrics.listen_addr.parse()?;
        metrics::init_metrics(addr);
    }

    // 4. Build the audit pipeline
    let pipeline = Arc::new(build_pipeline(&settings)?);
    info!(
        "Audit pipeline ready (endpoint: {}, max attempts: {})",
        settings.audit.api_endpoint, settings.retry.max_attempts
    );

    // 5. Start HTTP server
    let app = routes::routes(pipeline);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启动 Prometheus HTTP 导出并注册流水线指标
pub fn init_metrics(addr: SocketAddr) {
    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!("audit_requests_total", "Total number of audit requests received");
    describe_counter!(
        "audit_failures_total",
        "Total number of failed audit requests by error code"
    );
    describe_histogram!(
        "audit_duration_seconds",
        "End-to-end duration of audit requests in seconds"
    );
    describe_counter!(
        "probe_attempts_total",
        "Total number of reachability probes by outcome"
    );
    describe_counter!(
        "audit_upstream_attempts_total",
        "Total number of audit API attempts by response status"
    );
}

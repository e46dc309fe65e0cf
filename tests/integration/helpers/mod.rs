// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use auditrs::config::settings::Settings;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGESPEED_PATH: &str = "/pagespeedonline/v5/runPagespeed";

/// 指向 mock 审计接口的测试配置
///
/// 允许私有地址以便探测本机的 mock 站点，退避缩短到毫秒级
pub fn test_settings(audit_server: &MockServer) -> Settings {
    let mut settings = Settings::defaults().expect("default settings");
    settings.sanitizer.allow_private_hosts = true;
    settings.probe.timeout_secs = 5;
    settings.audit.api_endpoint = format!("{}{}", audit_server.uri(), PAGESPEED_PATH);
    settings.audit.timeout_secs = 5;
    settings.retry.initial_backoff_ms = 10;
    settings.metrics.enabled = false;
    settings
}

/// 启动一个对 HEAD / 返回 200 的目标站点
pub async fn start_target_site() -> MockServer {
    let site = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&site)
        .await;
    site
}

/// 返回一个没有进程监听的本机地址
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// 典型的 Lighthouse 报告
pub fn lighthouse_payload() -> Value {
    json!({
        "id": "https://example.com/",
        "lighthouseResult": {
            "finalUrl": "https://example.com/",
            "categories": {
                "performance": { "id": "performance", "score": 0.64 },
                "accessibility": { "id": "accessibility", "score": 0.88 },
                "best-practices": { "id": "best-practices", "score": 0.96 },
                "seo": { "id": "seo", "score": 0.9 }
            },
            "audits": {
                "unused-javascript": {
                    "id": "unused-javascript",
                    "title": "Reduce unused JavaScript",
                    "description": "Reduce unused JavaScript and defer loading scripts.",
                    "score": 0.45,
                    "displayValue": "Potential savings of 210 KiB",
                    "details": { "type": "opportunity", "overallSavingsMs": 600 }
                },
                "bootup-time": {
                    "id": "bootup-time",
                    "title": "Reduce JavaScript execution time",
                    "description": "Consider reducing the time spent parsing, compiling, and executing JS.",
                    "score": 0.5,
                    "displayValue": "2.4 s",
                    "details": { "type": "table", "items": [] }
                },
                "color-contrast": {
                    "id": "color-contrast",
                    "title": "Background and foreground colors do not have a sufficient contrast ratio.",
                    "description": "Low-contrast text is difficult or impossible for many users to read.",
                    "score": 0,
                    "details": { "type": "table", "items": [] }
                },
                "viewport": {
                    "id": "viewport",
                    "title": "Has a viewport meta tag",
                    "description": "A viewport tag optimizes your app for mobile screen sizes.",
                    "score": 1
                },
                "final-screenshot": {
                    "id": "final-screenshot",
                    "title": "Final Screenshot",
                    "score": null,
                    "details": { "type": "screenshot" }
                }
            }
        }
    })
}

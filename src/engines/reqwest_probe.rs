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

use crate::engines::traits::{HttpProbe, TransportError};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// 默认探测 User-Agent
pub const DEFAULT_PROBE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 探测引擎
///
/// 基于reqwest的HEAD探测，不跟随重定向，3xx 直接作为可达结果返回
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    /// 创建探测引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 探测时使用的客户端标识
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    /// 执行HEAD探测
    ///
    /// # 参数
    ///
    /// * `url` - 候选地址
    /// * `timeout` - 单次探测超时时间
    ///
    /// # 返回值
    ///
    /// * `Ok(u16)` - HTTP状态码
    /// * `Err(TransportError)` - 传输层错误
    async fn probe(&self, url: &str, timeout: Duration) -> Result<u16, TransportError> {
        let start = Instant::now();
        let response = self.client.head(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();

        debug!(
            "Probe {} answered {} in {}ms",
            url,
            status,
            start.elapsed().as_millis()
        );
        Ok(status)
    }

    fn name(&self) -> &'static str {
        "reqwest-head"
    }
}

// Timed HTTP fetcher — measures connect-phase latency separately from the response wait.

use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Empty;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper::header;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

use super::traits::TargetFetcher;
use crate::config::USER_AGENT;
use crate::engine::results::{CacheStatus, FetchOutcome};

/// Performs one GET per URL over a fresh connection so the connect
/// phase (DNS + TCP + TLS) can be timed on its own. The connect and
/// response-wait phases are each bounded by the configured timeout.
pub struct TimedFetcher {
    timeout: Duration,
    inspect_non_success_headers: bool,
    tls: tokio_native_tls::TlsConnector,
}

impl TimedFetcher {
    pub fn new(timeout: Duration, inspect_non_success_headers: bool) -> Result<Self> {
        let tls = native_tls::TlsConnector::new().context("build tls connector")?;
        Ok(Self {
            timeout,
            inspect_non_success_headers,
            tls: tokio_native_tls::TlsConnector::from(tls),
        })
    }

    async fn try_fetch(&self, raw_url: &str) -> Result<FetchOutcome> {
        let url = Url::parse(raw_url).context("invalid url")?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("url has no host"))?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| anyhow!("cannot determine port"))?;
        let https = match url.scheme() {
            "http" => false,
            "https" => true,
            other => bail!("unsupported scheme: {}", other),
        };

        // Host header keeps an explicit port, default ports are elided.
        let host_header = match url.port() {
            Some(p) => format!("{}:{}", host, p),
            None => host.clone(),
        };

        // Connect phase: everything up to a usable transport runs under
        // one deadline and one timer. For https that includes the TLS
        // handshake, since the request cannot go out before it.
        let connect_start = Instant::now();
        let (response, connect_time) = if https {
            let stream = timeout(self.timeout, async {
                let tcp = TcpStream::connect((host.as_str(), port))
                    .await
                    .context("tcp connect")?;
                self.tls.connect(&host, tcp).await.context("tls handshake")
            })
            .await
            .map_err(|_| anyhow!("connect timed out after {}s", self.timeout.as_secs()))??;
            let connect_time = connect_start.elapsed();
            let response = self.send_get(stream, &url, &host_header).await?;
            (response, connect_time)
        } else {
            let stream = timeout(self.timeout, TcpStream::connect((host.as_str(), port)))
                .await
                .map_err(|_| anyhow!("connect timed out after {}s", self.timeout.as_secs()))?
                .context("tcp connect")?;
            let connect_time = connect_start.elapsed();
            let response = self.send_get(stream, &url, &host_header).await?;
            (response, connect_time)
        };

        debug!(
            "warmed url={} status={} connect_ms={:.2}",
            raw_url,
            response.status().as_u16(),
            connect_time.as_secs_f64() * 1000.0
        );

        Ok(self.outcome_from_response(raw_url, &response, connect_time))
    }

    /// Issue the GET over an established transport and wait for the
    /// response head. The body is not read; warming only needs the
    /// edge to serve the object.
    async fn send_get<S>(&self, stream: S, url: &Url, host_header: &str) -> Result<Response<Incoming>>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (mut sender, conn) = http1::handshake(TokioIo::new(stream))
            .await
            .context("http handshake")?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!("connection task ended: {}", e);
            }
        });

        let target = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };

        let request = Request::get(target)
            .header(header::HOST, host_header)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::CONNECTION, "close")
            .body(Empty::<Bytes>::new())
            .context("build request")?;

        timeout(self.timeout, sender.send_request(request))
            .await
            .map_err(|_| anyhow!("response timed out after {}s", self.timeout.as_secs()))?
            .context("send request")
    }

    fn outcome_from_response(
        &self,
        url: &str,
        response: &Response<Incoming>,
        connect_time: Duration,
    ) -> FetchOutcome {
        let status = response.status().as_u16();

        let mut age = Some(0);
        let mut cache = CacheStatus::NotFound;

        // The reference warmer only consults cache headers on 200.
        if status == 200 || self.inspect_non_success_headers {
            age = Some(
                response
                    .headers()
                    .get(header::AGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(0),
            );
            if let Some(v) = response
                .headers()
                .get("x-cache")
                .and_then(|v| v.to_str().ok())
            {
                cache = CacheStatus::Header(v.to_string());
            }
        }

        FetchOutcome {
            url: url.to_string(),
            status,
            connect_time: Some(connect_time),
            age,
            cache,
        }
    }
}

#[async_trait]
impl TargetFetcher for TimedFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.try_fetch(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("fetch failed url={} error={:#}", url, e);
                FetchOutcome::failure(url, format!("{:#}", e))
            }
        }
    }
}

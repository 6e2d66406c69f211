//! HTTP 传输层
//!
//! 基于 `gloo-net` 的 fetch 实现 [`grocer::HttpClient`]。
//! 超时由 `gloo-timers` 计时，超时后通过 `AbortController` 取消请求。

use futures::future::{Either, select};
use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use grocer::shared::HttpMethod;
use grocer::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use web_sys::AbortController;

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchHttpClient;

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let controller = AbortController::new()
            .map_err(|e| ClientError::invalid_request(format!("AbortController unavailable: {:?}", e)))?;
        let signal = controller.signal();

        let mut builder = RequestBuilder::new(&req.url)
            .method(method_of(req.method))
            .abort_signal(Some(&signal));

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::invalid_request(e.to_string()).with_source(e))?;

        let exchange = async {
            let resp = request.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, gloo_net::Error>(HttpResponse { status, body })
        };

        let result = match req.timeout {
            Some(timeout) => {
                let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
                match select(Box::pin(exchange), TimeoutFuture::new(millis)).await {
                    Either::Left((result, _)) => result,
                    Either::Right(_) => {
                        controller.abort();
                        return Err(ClientError::network("request timed out"));
                    }
                }
            }
            None => exchange.await,
        };

        result.map_err(|e| ClientError::network(e.to_string()).with_source(e))
    }
}

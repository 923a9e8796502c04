// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 单次请求周期
//!
//! 读取 → 解析请求行 → 构建 environ → 调用应用 → 组装并写出响应。
//!
//! 连接以值的形式移入 [`Gateway::handle_one_request`]，函数返回（或中途出错、
//! 应用 panic 展开）时连接随之被 drop，因此每个连接在任何路径上都恰好关闭一次。

use std::io;

use chrono::Utc;
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    application::Application,
    config::Config,
    environ::{Environ, ServerIdentity},
    exception::Exception,
    param::FIXED_DATE,
    request::Request,
    response::ResponseBuilder,
    util::{format_date, wire_dump},
};

/// 一次请求周期的正常结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 对端没有发送任何字节，未调用应用，也未写出任何内容。
    Closed,
    /// 响应已写出，携带写出的字节数。
    Sent(usize),
}

pub struct Gateway {
    application: Box<dyn Application>,
    identity: ServerIdentity,
    read_buffer_size: usize,
    server_software: String,
    dynamic_date: bool,
    trace_wire: bool,
}

impl Gateway {
    pub fn new(application: Box<dyn Application>, identity: ServerIdentity, config: &Config) -> Self {
        Self {
            application,
            identity,
            read_buffer_size: config.read_buffer_size(),
            server_software: config.server_software().to_string(),
            dynamic_date: config.dynamic_date(),
            trace_wire: config.trace_wire(),
        }
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    fn date(&self) -> String {
        match self.dynamic_date {
            true => format_date(&Utc::now()),
            false => FIXED_DATE.to_string(),
        }
    }

    /// 处理一个连接上的一次请求，结束后连接被关闭。
    pub async fn handle_one_request<S>(&self, mut stream: S, id: u128) -> Result<Outcome, Exception>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        // 只读一次，超出缓冲区的部分被截断
        let mut buffer = vec![0u8; self.read_buffer_size];
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            debug!("[ID{}]客户端未发送数据，关闭连接", id);
            return Ok(Outcome::Closed);
        }
        debug!("[ID{}]HTTP请求接收完毕，{}字节", id, n);

        if self.trace_wire {
            let text = String::from_utf8_lossy(&buffer[..n]);
            info!(target: "wire", "[ID{}]\n{}", id, wire_dump('<', &text));
        }

        let request = Request::try_from(&buffer[..n], id)?;
        let summary = format!(
            "{}, {}, {}",
            request.version(),
            request.path(),
            request.method()
        );
        debug!("[ID{}]请求文本共{}字节", id, request.raw().len());

        let mut builder = ResponseBuilder::new(&self.date(), &self.server_software);
        let body = {
            let mut environ = Environ::build(request, &self.identity, Box::new(io::stderr()));
            self.application.call(&mut environ, &mut builder)?
        };
        debug!("[ID{}]应用返回{}个响应体分块", id, body.len());

        let response = builder.finish(body)?;
        info!("[ID{}] {}, {}", id, summary, response.status());
        debug!(
            "[ID{}]响应头{}个，响应体{}字节",
            id,
            response.headers().len(),
            response.content().len()
        );

        let response_bytes = response.as_bytes();
        if self.trace_wire {
            info!(target: "wire", "[ID{}]\n{}", id, wire_dump('>', &response.as_text()));
        }
        stream.write_all(&response_bytes).await?;
        stream.flush().await?;
        debug!("[ID{}]发送全量响应，长度: {}", id, response_bytes.len());

        Ok(Outcome::Sent(response_bytes.len()))
    }
}

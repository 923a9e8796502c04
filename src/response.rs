// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 响应构建模块
//!
//! 响应分两步完成：
//! 1. 应用调用 [`ResponseBuilder::start`] 记录状态行和自己的响应头，
//!    网关在其后追加 `Date` 与 `Server` 两个头；
//! 2. 网关拿到应用返回的响应体分块后调用 [`ResponseBuilder::finish`]，
//!    得到可以直接写入连接的 [`Response`]。
//!
//! 没有调用 `start` 就 `finish` 会得到 `ResponseStateMissing`。

use bytes::Bytes;

use crate::{exception::Exception, param::*};

/// 响应头，`(名称, 取值)`
pub type Header = (String, String);

pub fn header(name: &str, value: &str) -> Header {
    (name.to_string(), value.to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum ResponseState {
    Pending,
    Started { status: String, headers: Vec<Header> },
}

#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    state: ResponseState,
    date: String,
    server_software: String,
}

impl ResponseBuilder {
    /// `date` 和 `server_software` 是网关注入的两个响应头的取值。
    pub fn new(date: &str, server_software: &str) -> Self {
        Self {
            state: ResponseState::Pending,
            date: date.to_string(),
            server_software: server_software.to_string(),
        }
    }

    /// 记录状态行（如 `200 OK`）和应用提供的响应头。每个请求只能调用一次。
    pub fn start(&mut self, status: &str, headers: Vec<Header>) -> Result<(), Exception> {
        if self.is_started() {
            return Err(Exception::ResponseAlreadyStarted);
        }
        let mut headers = headers;
        headers.push(header("Date", &self.date));
        headers.push(header("Server", &self.server_software));
        self.state = ResponseState::Started {
            status: status.to_string(),
            headers,
        };
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        matches!(self.state, ResponseState::Started { .. })
    }

    /// 把响应体分块按顺序拼接，组装成完整的响应。
    pub fn finish(self, body: Vec<Bytes>) -> Result<Response, Exception> {
        let (status, headers) = match self.state {
            ResponseState::Started { status, headers } => (status, headers),
            ResponseState::Pending => return Err(Exception::ResponseStateMissing),
        };
        let mut content = String::new();
        for chunk in body.iter() {
            match std::str::from_utf8(chunk) {
                Ok(s) => content.push_str(s),
                Err(_) => return Err(Exception::BodyIsNotUtf8),
            }
        }
        Ok(Response {
            status,
            headers,
            content,
        })
    }
}

/// 已经组装完成的响应，只负责序列化。
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: String,
    headers: Vec<Header>,
    content: String,
}

impl Response {
    /// 序列化后的完整响应文本：状态行、逐行的响应头、空行、响应体。
    pub fn as_text(&self) -> String {
        let mut text = [HTTP_VERSION, " ", &self.status, CRLF].concat();
        for (name, value) in &self.headers {
            text.push_str(&[name.as_str(), ": ", value.as_str(), CRLF].concat());
        }
        text.push_str(CRLF);
        text.push_str(&self.content);
        text
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        self.as_text().into_bytes()
    }
}

impl Response {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ResponseBuilder {
        ResponseBuilder::new(FIXED_DATE, SERVER_SOFTWARE)
    }

    #[test]
    fn test_wire_format() {
        let mut builder = builder();
        builder
            .start("200 OK", vec![header("Content-Type", "text/plain")])
            .unwrap();
        let response = builder.finish(vec![Bytes::from_static(b"hi")]).unwrap();

        assert_eq!(
            response.as_bytes(),
            b"HTTP/1.1 200 OK\r\n\
              Content-Type: text/plain\r\n\
              Date: Mon, 15 Jul 2019 5:54:48 GMT\r\n\
              Server: WSGIServer 0.2\r\n\
              \r\n\
              hi"
            .to_vec()
        );
    }

    #[test]
    fn test_gateway_headers_follow_application_headers() {
        let mut builder = builder();
        builder
            .start(
                "404 Not Found",
                vec![header("Content-Type", "text/html"), header("X-Trace", "1")],
            )
            .unwrap();
        let response = builder.finish(vec![]).unwrap();

        let names: Vec<&str> = response.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Content-Type", "X-Trace", "Date", "Server"]);
        assert_eq!(response.status(), "404 Not Found");
    }

    #[test]
    fn test_chunks_are_concatenated_in_order() {
        let mut builder = builder();
        builder.start("200 OK", vec![]).unwrap();
        let response = builder
            .finish(vec![
                Bytes::from_static(b"Hello "),
                Bytes::new(),
                Bytes::from_static(b"world"),
            ])
            .unwrap();
        assert_eq!(response.content(), "Hello world");
        assert!(response.as_text().ends_with("\r\n\r\nHello world"));
    }

    #[test]
    fn test_no_headers_still_has_blank_line() {
        let mut builder = ResponseBuilder::new("d", "s");
        builder.start("204 No Content", vec![]).unwrap();
        let response = builder.finish(vec![]).unwrap();
        assert_eq!(
            response.as_text(),
            "HTTP/1.1 204 No Content\r\nDate: d\r\nServer: s\r\n\r\n"
        );
    }

    #[test]
    fn test_finish_without_start() {
        let result = builder().finish(vec![Bytes::from_static(b"hi")]);
        assert!(matches!(result, Err(Exception::ResponseStateMissing)));
    }

    #[test]
    fn test_start_twice() {
        let mut builder = builder();
        builder.start("200 OK", vec![]).unwrap();
        let second = builder.start("500 Internal Server Error", vec![]);
        assert!(matches!(second, Err(Exception::ResponseAlreadyStarted)));

        // 第一次记录的状态保持不变
        let response = builder.finish(vec![]).unwrap();
        assert_eq!(response.status(), "200 OK");
    }

    #[test]
    fn test_non_utf8_body() {
        let mut builder = builder();
        builder.start("200 OK", vec![]).unwrap();
        let result = builder.finish(vec![Bytes::from_static(&[0xFF, 0xFE])]);
        assert!(matches!(result, Err(Exception::BodyIsNotUtf8)));
    }
}

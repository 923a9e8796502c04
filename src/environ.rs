// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 执行上下文（environ）
//!
//! 每个请求构建一次，交给应用后即丢弃。字段与网关协议约定一一对应：
//!
//! | 字段 | 含义 |
//! |------|------|
//! | `version` | 协议版本标记 `(1, 0)` |
//! | `url_scheme` | 固定为 `http` |
//! | `input` | 可读流，内容是本次读到的完整请求文本 |
//! | `errors` | 错误输出流 |
//! | `multithread` / `multiprocess` / `run_once` | 固定为 `false` |
//! | `request_method` / `path_info` | 来自请求行 |
//! | `server_name` / `server_port` | 服务器身份，端口为文本 |

use std::{
    fmt,
    io::{self, Cursor, Read, Write},
};

use crate::{
    param::{GATEWAY_VERSION, URL_SCHEME},
    request::Request,
};

/// 服务器身份，绑定完成后不再变化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    name: String,
    port: u16,
}

impl ServerIdentity {
    pub fn new(name: &str, port: u16) -> Self {
        Self {
            name: name.to_string(),
            port,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

pub struct Environ {
    pub version: (u8, u8),
    pub url_scheme: &'static str,
    /// 注意这里暴露的是整段请求文本，而不只是请求体
    pub input: Cursor<String>,
    pub errors: Box<dyn Write>,
    pub multithread: bool,
    pub multiprocess: bool,
    pub run_once: bool,
    pub request_method: String,
    pub path_info: String,
    pub server_name: String,
    pub server_port: String,
}

impl Environ {
    /// 由解析后的请求和服务器身份构建 environ。
    ///
    /// `errors` 通常是标准错误输出，测试中可以换成内存缓冲区。
    pub fn build(request: Request, identity: &ServerIdentity, errors: Box<dyn Write>) -> Self {
        let request_method = request.method().to_string();
        let path_info = request.path().to_string();
        Self {
            version: GATEWAY_VERSION,
            url_scheme: URL_SCHEME,
            input: Cursor::new(request.into_raw()),
            errors,
            multithread: false,
            multiprocess: false,
            run_once: false,
            request_method,
            path_info,
            server_name: identity.name().to_string(),
            server_port: identity.port().to_string(),
        }
    }

    /// 读出输入流中剩余的全部文本。
    pub fn read_input(&mut self) -> io::Result<String> {
        let mut text = String::new();
        self.input.read_to_string(&mut text)?;
        Ok(text)
    }
}

impl fmt::Debug for Environ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environ")
            .field("version", &self.version)
            .field("url_scheme", &self.url_scheme)
            .field("input_len", &self.input.get_ref().len())
            .field("multithread", &self.multithread)
            .field("multiprocess", &self.multiprocess)
            .field("run_once", &self.run_once)
            .field("request_method", &self.request_method)
            .field("path_info", &self.path_info)
            .field("server_name", &self.server_name)
            .field("server_port", &self.server_port)
            .finish_non_exhaustive()
    }
}

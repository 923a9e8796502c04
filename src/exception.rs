// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了网关在一次请求周期中可能产生的各类异常情况。
//!
//! ## 分类
//! - **协议解析**：请求字节不是 UTF-8，或请求行不是恰好三个字段。
//! - **应用契约**：应用自身出错、未调用 `start` 就结束响应、重复调用 `start`。
//! - **启动阶段**：`module:callable` 格式不正确或找不到对应的应用，监听地址非法。
//! - **I/O**：套接字读写失败。
//!
//! 空读（对端未发送任何字节）不属于异常，由网关直接关闭连接处理。

use std::{fmt, io};

/// 网关处理请求过程中发生的异常类型。
#[derive(Debug)]
pub enum Exception {
    /// 客户端发送的请求字节流无法解析为合法的 UTF-8 字符串。
    RequestIsNotUtf8,
    /// 请求行没有被空白切分成恰好三个字段（方法、路径、版本）。携带原始请求行。
    MalformedRequestLine(String),
    /// 应用在产生响应体时报告了错误。
    HandlerFault(String),
    /// 应用返回了响应体，但从未调用过 `start`，响应状态为空。
    ResponseStateMissing,
    /// 同一个请求中 `start` 被调用了不止一次。
    ResponseAlreadyStarted,
    /// 应用返回的响应体分块不是合法的 UTF-8 文本。
    BodyIsNotUtf8,
    /// 命令行给出的应用路径不符合 `module:callable` 格式。
    InvalidApplicationPath(String),
    /// 注册表中不存在该 `module:callable`。
    ApplicationNotFound(String),
    /// 配置中的监听地址无法解析。
    InvalidAddress(String),
    /// 底层套接字读写失败。
    Io(io::Error),
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestIsNotUtf8 => write!(f, "Request bytes can't be parsed in UTF-8"),
            MalformedRequestLine(line) => write!(f, "Malformed request line: {:?}", line),
            HandlerFault(reason) => write!(f, "Application failed: {}", reason),
            ResponseStateMissing => write!(f, "Response body produced before start was called"),
            ResponseAlreadyStarted => write!(f, "start was called more than once"),
            BodyIsNotUtf8 => write!(f, "Response body chunk is not valid UTF-8"),
            InvalidApplicationPath(path) => {
                write!(f, "Expected an application as module:callable, got {:?}", path)
            }
            ApplicationNotFound(path) => write!(f, "No application registered as {}", path),
            InvalidAddress(host) => write!(f, "Invalid listen address: {}", host),
            Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Exception {
    fn from(e: io::Error) -> Self {
        Io(e)
    }
}

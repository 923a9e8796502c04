// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求解析模块
//!
//! 把一次读取得到的原始字节解码为文本，并从第一行中提取方法、路径与协议版本。
//! 网关不解析任何请求头，也不区分请求体：解码后的完整文本会原样保留，
//! 之后通过 environ 的输入流交给应用。

use crate::exception::Exception;
use log::error;

/// 可以结束一行的字符：`\r`、`\n` 以及各类 Unicode 行分隔符。
/// `\r\n` 会被切成请求行加一个空段，不影响取第一行。
const LINE_BREAKS: [char; 10] = [
    '\r', '\n', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// 一次请求的请求行以及解码后的完整请求文本。
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP 请求方法，原样保留客户端发送的写法
    method: String,
    /// 请求的资源路径（包含查询字符串）
    path: String,
    /// 请求行中的协议版本字段
    version: String,
    /// 本次读取到的全部文本
    raw: String,
}

impl Request {
    /// 从原始字节缓冲区尝试构建 `Request` 实例。
    ///
    /// # 逻辑步骤
    /// 1. 验证编码：请求数据必须是合法的 UTF-8。
    /// 2. 取第一行（`\n` 或 `\r\n` 之前的内容）作为请求行。
    /// 3. 按空白切分请求行，必须恰好得到三个字段。
    ///
    /// # 参数
    /// * `buffer` - 从 Socket 读取到的字节，不含缓冲区中未填充的部分。
    /// * `id` - 连接序号，只用于日志追踪。
    pub fn try_from(buffer: &[u8], id: u128) -> Result<Self, Exception> {
        let raw = match std::str::from_utf8(buffer) {
            Ok(s) => s.to_string(),
            Err(_) => {
                error!("[ID{}]无法解析HTTP请求", id);
                return Err(Exception::RequestIsNotUtf8);
            }
        };

        let request_line = raw.split(LINE_BREAKS).next().unwrap_or("");
        let parts: Vec<&str> = request_line.split_whitespace().collect();
        let (method, path, version) = match parts.as_slice() {
            [method, path, version] => (method.to_string(), path.to_string(), version.to_string()),
            _ => {
                error!("[ID{}]HTTP请求行格式不正确：{:?}", id, request_line);
                return Err(Exception::MalformedRequestLine(request_line.to_string()));
            }
        };

        Ok(Self {
            method,
            path,
            version,
            raw,
        })
    }
}

impl Request {
    /// 获取请求方法
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取请求路径（含查询参数）
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 获取协议版本
    pub fn version(&self) -> &str {
        &self.version
    }

    /// 获取解码后的完整请求文本
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

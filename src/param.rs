// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 网关协议参数与常量模块
//!
//! 该模块集中定义网关在报文读写和 environ 构建中使用的常量：
//! - 读缓冲区大小、默认端口、监听队列长度等运行参数。
//! - 注入到每个响应中的 `Date` 与 `Server` 头的默认值。

/// HTTP 协议规定的换行符（Carriage Return Line Feed）
pub const CRLF: &str = "\r\n";

/// 响应状态行使用的协议版本
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// 单次读取请求时使用的缓冲区大小，超出部分会被截断
pub const READ_BUFFER_SIZE: usize = 1024;

/// 演示配置下的监听端口
pub const DEFAULT_PORT: u16 = 8888;

/// 监听地址，默认监听所有网卡
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// 监听套接字的等待队列长度
pub const LISTEN_BACKLOG: u32 = 1;

/// `Server` 响应头的默认取值
pub const SERVER_SOFTWARE: &str = "WSGIServer 0.2";

/// `Date` 响应头的固定取值。只有开启 `dynamic_date` 时才会使用当前时间。
pub const FIXED_DATE: &str = "Mon, 15 Jul 2019 5:54:48 GMT";

/// environ 中的协议版本标记
pub const GATEWAY_VERSION: (u8, u8) = (1, 0);

/// environ 中的 URL scheme，网关只处理明文 HTTP
pub const URL_SCHEME: &str = "http";

// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use std::{env, fs, net::IpAddr};

use chrono::{DateTime, Utc};

/// 按 `Date` 响应头的格式输出时间，例如 `Tue, 16 Oct 2026 08:00:00 GMT`。
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// 计算 environ 中的 `server_name`。
///
/// 依次尝试：配置中的显式名称；回环地址对应的 `localhost`；
/// 未指定地址（`0.0.0.0`、`::`）对应的本机主机名；最后退回 IP 文本。
///
/// 不做反向 DNS 查询，绑定在具体网卡地址上时得到的是 IP 文本而不是域名，
/// 需要域名时请在配置中设置 `server_name`。
pub fn resolve_server_name(ip: IpAddr, configured: Option<&str>) -> String {
    if let Some(name) = configured {
        return name.to_string();
    }
    if ip.is_loopback() {
        return "localhost".to_string();
    }
    if ip.is_unspecified() {
        if let Some(name) = system_hostname() {
            return name;
        }
    }
    ip.to_string()
}

fn system_hostname() -> Option<String> {
    let from_env = env::var("HOSTNAME").ok();
    let name = match from_env {
        Some(n) => n,
        None => fs::read_to_string("/etc/hostname").ok()?,
    };
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// 把报文按行加上方向前缀，`<` 表示收到的请求，`>` 表示发出的响应。
pub fn wire_dump(prefix: char, text: &str) -> String {
    text.lines()
        .map(|line| format!("{} {}", prefix, line))
        .collect::<Vec<String>>()
        .join("\n")
}

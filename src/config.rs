// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;
use std::net::{IpAddr, SocketAddr};

use crate::exception::Exception;
use crate::param::{
    DEFAULT_HOST, DEFAULT_PORT, LISTEN_BACKLOG, READ_BUFFER_SIZE, SERVER_SOFTWARE,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_backlog")]
    backlog: u32,
    #[serde(default = "default_read_buffer_size")]
    read_buffer_size: usize,
    #[serde(default = "default_server_software")]
    server_software: String,
    #[serde(default)]
    dynamic_date: bool,
    #[serde(default = "default_trace_wire")]
    trace_wire: bool,
    #[serde(default)]
    stop_on_fault: bool,
    #[serde(default)]
    server_name: Option<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_backlog() -> u32 {
    LISTEN_BACKLOG
}

fn default_read_buffer_size() -> usize {
    READ_BUFFER_SIZE // 1KB
}

fn default_server_software() -> String {
    SERVER_SOFTWARE.to_string()
}

fn default_trace_wire() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backlog: default_backlog(),
            read_buffer_size: default_read_buffer_size(),
            server_software: default_server_software(),
            dynamic_date: false,
            trace_wire: default_trace_wire(),
            stop_on_fault: false,
            server_name: None,
        }
    }

    /// 从 TOML 文件读取配置。文件缺失或内容无法解析时退回默认配置。
    pub fn from_toml(filename: &str) -> Self {
        let mut file = match File::open(filename) {
            Ok(f) => f,
            Err(e) => {
                warn!("无法打开配置文件{}：{}，使用默认配置", filename, e);
                return Config::new();
            }
        };
        let mut str_val = String::new();
        if let Err(e) = file.read_to_string(&mut str_val) {
            error!("读取配置文件{}失败：{}，使用默认配置", filename, e);
            return Config::new();
        }
        Self::from_toml_str(&str_val)
    }

    pub fn from_toml_str(toml_str: &str) -> Self {
        let mut raw_config: Config = match toml::from_str(toml_str) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        if raw_config.read_buffer_size == 0 {
            warn!(
                "read_buffer_size被设置为0，这会让每个连接都被当作空读关闭，因此该值将被改为{}。",
                READ_BUFFER_SIZE
            );
            raw_config.read_buffer_size = READ_BUFFER_SIZE;
        }
        if raw_config.backlog == 0 {
            warn!("backlog被设置为0，该值将被改为{}。", LISTEN_BACKLOG);
            raw_config.backlog = LISTEN_BACKLOG;
        }
        raw_config
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_dynamic_date(mut self, dynamic_date: bool) -> Self {
        self.dynamic_date = dynamic_date;
        self
    }

    pub fn with_stop_on_fault(mut self, stop_on_fault: bool) -> Self {
        self.stop_on_fault = stop_on_fault;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.read_buffer_size = size;
        }
        self
    }
}

impl Config {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn backlog(&self) -> u32 {
        self.backlog
    }

    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    pub fn server_software(&self) -> &str {
        &self.server_software
    }

    pub fn dynamic_date(&self) -> bool {
        self.dynamic_date
    }

    pub fn trace_wire(&self) -> bool {
        self.trace_wire
    }

    pub fn stop_on_fault(&self) -> bool {
        self.stop_on_fault
    }

    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    /// 由 `host` 与 `port` 组成监听地址。`host` 必须是 IP 字面量。
    pub fn socket_addr(&self) -> Result<SocketAddr, Exception> {
        match self.host.parse::<IpAddr>() {
            Ok(ip) => Ok(SocketAddr::new(ip, self.port)),
            Err(_) => Err(Exception::InvalidAddress(self.host.clone())),
        }
    }
}

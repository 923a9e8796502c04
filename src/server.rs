// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 连接接收器
//!
//! 持有监听套接字，逐个接收连接并交给 [`Gateway`] 处理。
//! 一个连接从接收到关闭的整个过程结束之前，不会接收下一个连接。

use std::net::SocketAddr;

use log::{debug, error, info};
use tokio::net::{TcpListener, TcpSocket};

use crate::{
    application::Application,
    config::Config,
    environ::ServerIdentity,
    exception::Exception,
    gateway::{Gateway, Outcome},
    util::resolve_server_name,
};

pub struct Server {
    listener: TcpListener,
    gateway: Gateway,
    stop_on_fault: bool,
}

impl Server {
    /// 绑定监听地址（开启地址复用，等待队列长度取自配置，默认 1），
    /// 并把应用注入服务器。端口为 0 时由系统分配。
    pub async fn bind(
        address: SocketAddr,
        application: Box<dyn Application>,
        config: &Config,
    ) -> Result<Self, Exception> {
        let socket = match address {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_reuseaddr(true)?;
        if let Err(e) = socket.bind(address) {
            error!("无法绑定地址：{}，错误：{}", address, e);
            return Err(e.into());
        }
        let listener = socket.listen(config.backlog())?;

        let local = listener.local_addr()?;
        let name = resolve_server_name(local.ip(), config.server_name());
        info!("地址{}绑定完成，服务器名称：{}", local, name);
        let identity = ServerIdentity::new(&name, local.port());

        Ok(Self {
            listener,
            gateway: Gateway::new(application, identity, config),
            stop_on_fault: config.stop_on_fault(),
        })
    }

    pub fn identity(&self) -> &ServerIdentity {
        self.gateway.identity()
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Exception> {
        Ok(self.listener.local_addr()?)
    }

    /// 主循环：接收一个连接，处理完毕后再接收下一个。
    ///
    /// `accept` 失败时直接返回错误。单个请求出错时，默认记录日志并继续；
    /// 配置了 `stop_on_fault` 时返回该错误。
    pub async fn serve_forever(&self) -> Result<(), Exception> {
        let mut id: u128 = 0;
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    error!("接收连接失败：{}", e);
                    return Err(e.into());
                }
            };
            debug!("[ID{}]新的连接：{}", id, addr);

            match self.gateway.handle_one_request(stream, id).await {
                Ok(Outcome::Closed) => debug!("[ID{}]空连接已关闭", id),
                Ok(Outcome::Sent(n)) => debug!("[ID{}]连接已关闭，共发送{}字节", id, n),
                Err(e) if self.stop_on_fault => {
                    error!("[ID{}]处理请求失败，停止服务：{}", id, e);
                    return Err(e);
                }
                Err(e) => error!("[ID{}]处理请求失败：{}", id, e),
            }
            id += 1;
        }
    }
}

// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 单连接 HTTP 网关
//!
//! 从命令行取得 `module:callable` 形式的应用名称，绑定监听地址，
//! 然后逐个处理连接：每个连接读一次请求，交给应用，写回响应后关闭。
//! 运行时为单线程，不会并发处理多个连接。

use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use gateway::{application, Config, Server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Application to serve, as module:callable (e.g. flaskapp:app)
    #[arg(value_parser)]
    application: String,

    /// Path of the config file
    #[arg(short, long, value_parser, default_value = "config/development.toml")]
    config: String,

    /// Path of the log4rs config file
    #[arg(long, value_parser, default_value = "config/log4rs.yaml")]
    log_config: String,

    /// Override the listen host from the config file
    #[arg(long, value_parser)]
    host: Option<String>,

    /// Override the listen port from the config file
    #[arg(short, long, value_parser)]
    port: Option<u16>,
}

/// 初始化日志：优先使用 log4rs 的 YAML 配置，失败时退回控制台输出。
fn init_logging(path: &str) {
    if let Err(e) = log4rs::init_file(path, Default::default()) {
        eprintln!("无法载入日志配置{}：{}，使用控制台日志", path, e);
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
            )))
            .build();
        let config = log4rs::Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info));
        match config {
            Ok(c) => {
                if let Err(e) = log4rs::init_config(c) {
                    eprintln!("无法初始化日志系统：{}", e);
                }
            }
            Err(e) => eprintln!("无法构建日志配置：{}", e),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // 1. 日志系统
    init_logging(&args.log_config);

    // 2. 配置文件，命令行参数优先
    let mut config = Config::from_toml(&args.config);
    if let Some(host) = &args.host {
        config = config.with_host(host);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    info!("配置文件已载入");

    // 3. 找到要服务的应用
    let application = match application::load(&args.application) {
        Ok(app) => app,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            eprintln!("可用的应用：{}", application::registered().join(", "));
            return ExitCode::FAILURE;
        }
    };
    info!("应用{}已载入", &args.application);

    // 4. 绑定端口
    let address = match config.socket_addr() {
        Ok(a) => a,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let server = match Server::bind(address, application, &config).await {
        Ok(s) => s,
        Err(e) => {
            error!("无法绑定{}：{}", address, e);
            return ExitCode::FAILURE;
        }
    };

    println!("Serving HTTP on port {} ...\n", server.identity().port());

    // 5. 主循环，只有 accept 失败或 stop_on_fault 时才会返回
    match server.serve_forever().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("服务器退出：{}", e);
            ExitCode::FAILURE
        }
    }
}

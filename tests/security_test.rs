// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod security_tests {
    //! # 畸形请求回归测试
    //!
    //! 验证网关在面对不合规报文时的行为：
    //! - 请求行字段数不对、不是 UTF-8 的请求不会得到响应，连接被直接关闭；
    //! - 超过读缓冲区的请求被截断；
    //! - 默认策略下出错的请求不会让服务器停止；
    //! - 开启 `stop_on_fault` 时第一个出错的请求会结束主循环。

    use std::net::SocketAddr;

    use gateway::{application, Config, Exception, Server};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
        task::{spawn_local, JoinHandle, LocalSet},
    };

    async fn start(config: Config) -> (SocketAddr, JoinHandle<Result<(), Exception>>) {
        let config = config.with_host("127.0.0.1").with_port(0);
        let server = Server::bind(
            config.socket_addr().unwrap(),
            application::load("flaskapp:app").unwrap(),
            &config,
        )
        .await
        .unwrap();
        let addr = server.local_addr().unwrap();
        (addr, spawn_local(async move { server.serve_forever().await }))
    }

    /// 发送请求并读到连接关闭。连接被对端重置也算作没有响应。
    async fn send_request(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        if stream.write_all(request).await.is_err() {
            return Vec::new();
        }
        let mut buffer = Vec::new();
        match stream.read_to_end(&mut buffer).await {
            Ok(_) => buffer,
            Err(_) => Vec::new(),
        }
    }

    async fn assert_still_serving(addr: SocketAddr) {
        let response = send_request(addr, b"GET /hello HTTP/1.1\r\n\r\n").await;
        assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"), "服务器应当继续工作");
    }

    /// ## 请求行字段数不对
    #[tokio::test]
    async fn test_wrong_token_count() {
        LocalSet::new()
            .run_until(async {
                let (addr, _handle) = start(Config::new()).await;

                let attacks: [&[u8]; 5] = [
                    &b"GET\r\n\r\n"[..],
                    &b"GET /\r\n\r\n"[..],
                    &b"GET / HTTP/1.1 trailing\r\n\r\n"[..],
                    &b"\r\n\r\n"[..],
                    &b"   \r\n"[..],
                ];
                for attack in attacks {
                    let response = send_request(addr, attack).await;
                    assert!(response.is_empty(), "畸形请求不应得到响应：{:?}", attack);
                }

                assert_still_serving(addr).await;
            })
            .await;
    }

    /// ## 非 UTF-8 的字节流
    #[tokio::test]
    async fn test_binary_garbage() {
        LocalSet::new()
            .run_until(async {
                let (addr, _handle) = start(Config::new()).await;

                let response = send_request(addr, &[0xFF, 0xFE, 0x00, 0x80, b'\r', b'\n']).await;
                assert!(response.is_empty());

                assert_still_serving(addr).await;
            })
            .await;
    }

    /// ## 超长请求行
    /// 请求行被截断到缓冲区大小后只剩两个字段，因此不会得到响应。
    #[tokio::test]
    async fn test_oversized_request_line_is_truncated() {
        LocalSet::new()
            .run_until(async {
                let (addr, _handle) = start(Config::new()).await;

                let request = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(4096));
                let response = send_request(addr, request.as_bytes()).await;
                assert!(response.is_empty());

                assert_still_serving(addr).await;
            })
            .await;
    }

    /// ## stop_on_fault
    /// 出错的请求让主循环带着该错误返回。
    #[tokio::test]
    async fn test_stop_on_fault_ends_loop() {
        LocalSet::new()
            .run_until(async {
                let (addr, handle) = start(Config::new().with_stop_on_fault(true)).await;

                let response = send_request(addr, b"GET /\r\n\r\n").await;
                assert!(response.is_empty());

                let result = handle.await.unwrap();
                assert!(matches!(result, Err(Exception::MalformedRequestLine(_))));
            })
            .await;
    }
}

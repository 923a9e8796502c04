// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 应用接口
//!
//! 网关与业务代码之间唯一的边界。任何实现了 [`Application`] 的类型都可以
//! 注入到服务器中。命令行通过 `module:callable` 形式的名称在注册表中查找
//! 内置的演示应用。

use std::collections::HashMap;

use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    environ::Environ,
    exception::Exception,
    response::{header, ResponseBuilder},
};

/// 演示应用返回的固定问候语
pub const GREETING: &[u8] = b"Hello world from F l a s k!\n";

/// 每个请求调用一次。
///
/// 实现者应当先调用 `response.start(status, headers)`，再返回响应体分块。
/// 返回 `Err` 会中止本次请求，网关不会写出任何响应。
#[cfg_attr(test, mockall::automock)]
pub trait Application {
    fn call(
        &self,
        environ: &mut Environ,
        response: &mut ResponseBuilder,
    ) -> Result<Vec<Bytes>, Exception>;
}

/// 不论请求内容如何，都返回纯文本问候语。
#[derive(Debug, Default, Clone, Copy)]
pub struct HelloApp;

impl Application for HelloApp {
    fn call(
        &self,
        _environ: &mut Environ,
        response: &mut ResponseBuilder,
    ) -> Result<Vec<Bytes>, Exception> {
        response.start("200 OK", vec![header("Content-Type", "text/plain")])?;
        Ok(vec![Bytes::from_static(GREETING)])
    }
}

/// 把 environ 输入流中的内容原样返回。
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoApp;

impl Application for EchoApp {
    fn call(
        &self,
        environ: &mut Environ,
        response: &mut ResponseBuilder,
    ) -> Result<Vec<Bytes>, Exception> {
        let input = environ
            .read_input()
            .map_err(|e| Exception::HandlerFault(e.to_string()))?;
        response.start("200 OK", vec![header("Content-Type", "text/plain")])?;
        Ok(vec![Bytes::from(input)])
    }
}

type Factory = fn() -> Box<dyn Application>;

fn hello() -> Box<dyn Application> {
    Box::new(HelloApp)
}

fn echo() -> Box<dyn Application> {
    Box::new(EchoApp)
}

lazy_static! {
    static ref APPLICATIONS: HashMap<&'static str, Factory> = {
        let mut map: HashMap<&'static str, Factory> = HashMap::new();
        map.insert("flaskapp:app", hello);
        map.insert("echo:app", echo);
        map
    };
    static ref APPLICATION_PATH: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*:[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// 根据 `module:callable` 名称取得应用实例。
pub fn load(path: &str) -> Result<Box<dyn Application>, Exception> {
    if !APPLICATION_PATH.is_match(path) {
        return Err(Exception::InvalidApplicationPath(path.to_string()));
    }
    match APPLICATIONS.get(path) {
        Some(factory) => Ok(factory()),
        None => Err(Exception::ApplicationNotFound(path.to_string())),
    }
}

/// 已注册的全部应用名称，按字母序排列。
pub fn registered() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = APPLICATIONS.keys().copied().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        environ::ServerIdentity,
        param::{FIXED_DATE, SERVER_SOFTWARE},
        request::Request,
    };
    use std::io;

    fn environ_for(text: &str) -> Environ {
        let request = Request::try_from(text.as_bytes(), 0).unwrap();
        Environ::build(request, &ServerIdentity::new("localhost", 8888), Box::new(io::sink()))
    }

    #[test]
    fn test_hello_app() {
        let mut environ = environ_for("GET /hello HTTP/1.1\r\n\r\n");
        let mut builder = ResponseBuilder::new(FIXED_DATE, SERVER_SOFTWARE);

        let body = HelloApp.call(&mut environ, &mut builder).unwrap();
        let response = builder.finish(body).unwrap();

        assert_eq!(response.status(), "200 OK");
        assert_eq!(response.headers()[0], header("Content-Type", "text/plain"));
        assert_eq!(response.content(), "Hello world from F l a s k!\n");
    }

    #[test]
    fn test_hello_app_ignores_request() {
        let mut environ = environ_for("POST /anything/else HTTP/1.0\r\n\r\nbody");
        let mut builder = ResponseBuilder::new(FIXED_DATE, SERVER_SOFTWARE);
        let body = HelloApp.call(&mut environ, &mut builder).unwrap();
        assert_eq!(body, vec![Bytes::from_static(GREETING)]);
    }

    #[test]
    fn test_echo_app() {
        let text = "PUT /x HTTP/1.1\r\nHost: a\r\n\r\npayload";
        let mut environ = environ_for(text);
        let mut builder = ResponseBuilder::new(FIXED_DATE, SERVER_SOFTWARE);

        let body = EchoApp.call(&mut environ, &mut builder).unwrap();
        let response = builder.finish(body).unwrap();

        assert_eq!(response.content(), text);
    }

    #[test]
    fn test_load_registered() {
        assert!(load("flaskapp:app").is_ok());
        assert!(load("echo:app").is_ok());
        assert_eq!(registered(), vec!["echo:app", "flaskapp:app"]);
    }

    #[test]
    fn test_load_rejects_bad_paths() {
        for path in ["", "flaskapp", "flaskapp:", ":app", "a:b:c", "flask app:app"] {
            match load(path) {
                Err(Exception::InvalidApplicationPath(p)) => assert_eq!(p, path),
                _ => panic!("{:?} should be rejected", path),
            }
        }
    }

    #[test]
    fn test_load_unknown() {
        assert!(matches!(
            load("django.core:application"),
            Err(Exception::ApplicationNotFound(_))
        ));
    }
}

pub mod application;
pub mod config;
pub mod environ;
pub mod exception;
pub mod gateway;
pub mod param;
pub mod request;
pub mod response;
pub mod server;
pub mod util;

pub use application::{Application, EchoApp, HelloApp};
pub use config::Config;
pub use environ::{Environ, ServerIdentity};
pub use exception::Exception;
pub use gateway::{Gateway, Outcome};
pub use request::Request;
pub use response::{Response, ResponseBuilder};
pub use server::Server;

pub mod http;

pub use http::{HttpApi, DEFAULT_API_URL};

pub mod prelude {
    pub use super::http::{HttpApi, DEFAULT_API_URL};
    pub use lx_core::{NewsApi, Result, Error};
}

//! Operations against each DuckDuckGo endpoint.
//!
//! Every module adds its operation to [`DdgClient`](crate::DdgClient).

pub mod images;
pub mod maps;
pub mod news;
pub mod text;
pub mod translate;

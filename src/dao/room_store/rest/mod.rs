//! PostgREST room store speaking to the hosted datastore over HTTP.

mod config;
mod error;
mod models;
mod store;

pub use config::RestConfig;
pub use error::{RestDaoError, RestResult};
pub use store::RestRoomStore;

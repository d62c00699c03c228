//! Service layer behind the command-line subcommands.

mod query_service;

pub use query_service::QueryService;

/// Database Module
///
/// The database layer is split into three concerns:
/// - **Connection Management** (`connection.rs`): opening SQLite connections as a `QuerySource`
/// - **Query Results** (`query.rs`): draining a cursor into a `TabularResult`
/// - **Schema Introspection** (`schema.rs`): dialect-dispatched metadata queries
pub mod connection;
pub mod query;
pub mod schema;

pub use connection::*;
pub use query::*;
pub use schema::*;

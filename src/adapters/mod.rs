// Adapters layer: store clients behind the domain ports.

pub mod mongo;
pub mod postgres;

pub use mongo::MongoSourceReader;
pub use postgres::PostgresUpsertSink;

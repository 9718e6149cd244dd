// Adapters layer: concrete store clients behind the domain ports.

pub mod neo4j;
pub mod postgres;

pub use neo4j::Neo4jSink;
pub use postgres::PostgresSource;

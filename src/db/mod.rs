// src/db/mod.rs
//
// SQLite access: pools, versioned schema, health checks

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_memory_pool, get_connection, ConnectionPool, PooledConn,
};
pub use migrations::{
    get_database_stats, initialize_database, latest_schema_version, verify_database_integrity,
    DatabaseStats,
};

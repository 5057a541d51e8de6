pub mod kv;

pub use kv::PgKeyValueStore;

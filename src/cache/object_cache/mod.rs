pub mod moka;
pub mod redis;

pub use self::moka::MokaSnapshotCache;
pub use self::redis::RedisSnapshotCache;

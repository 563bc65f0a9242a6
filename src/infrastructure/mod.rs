pub mod in_memory;
pub mod pix;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

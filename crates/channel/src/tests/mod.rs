//! Service-Tests gegen einen In-Memory-Store

mod memory_store;

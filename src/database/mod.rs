pub mod banks;
pub mod connect;
pub mod idgen;
pub mod kiosk;
pub mod models;
pub mod mutations;
pub mod queries;

pub mod account;
pub mod command;
pub mod favorite;
pub mod partition;
pub mod payment;
pub mod ports;

pub mod db;
pub mod http;
pub mod storage;
pub mod token;

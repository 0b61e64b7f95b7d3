pub mod db;
pub mod gateway;
pub mod s3;
pub mod token;

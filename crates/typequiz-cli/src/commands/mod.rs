pub mod generate;
pub mod init;
pub mod normalize;
pub mod score;
pub mod validate;

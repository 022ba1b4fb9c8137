pub mod error;
pub mod pose_codec;

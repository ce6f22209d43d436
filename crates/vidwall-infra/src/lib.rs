//! vidwall-infra: OS adapters (session detection, ffmpeg transcode, cache, player launch).

pub mod env_detect;
pub mod launch;
pub mod resolve;
pub mod tools;
pub mod transcode;

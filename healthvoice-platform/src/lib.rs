pub mod command_speaker;

pub use command_speaker::CommandSpeaker;

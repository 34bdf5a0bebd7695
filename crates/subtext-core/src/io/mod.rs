pub mod catalog;
pub mod source;
pub mod srt;
pub mod subtitles;

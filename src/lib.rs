//! retroscope Library
//!
//! Renders legacy text art (ANSI art, NFO/DIZ files and BBS colour-code
//! texts) into styled rows: encoding guess, code page transcoding, SAUCE
//! metadata and ANSI.SYS control sequence interpretation.

pub mod bbs;
pub mod cli;
pub mod codepage;
pub mod config;
pub mod error;
pub mod guess;
pub mod pipeline;
pub mod render;
pub mod sauce;
pub mod terminal;
pub mod transcode;

pub use bbs::BbsFormat;
pub use codepage::{Charset, CodePage, UnicodeForm};
pub use config::Config;
pub use error::{Error, Result, Warning};
pub use guess::Guess;
pub use pipeline::{render, render_file, Input, RenderOptions, Rendered};
pub use render::{OutputFormat, OutputOptions};
pub use sauce::SauceRecord;
pub use terminal::{Document, Row, Run, StyleAttributes};
pub use transcode::Transcoder;

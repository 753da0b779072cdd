use anyhow::Result;
use serde::Serialize;
use sift_config::AppConfig;
use std::io::{self, Write};

pub mod completions;
pub mod dates;
pub mod explain;
pub mod parse;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

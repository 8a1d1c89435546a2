// src/commands/jsondump.rs
use super::{emit, parse, report};
use crate::cli::JsonDumpCli;
use crate::filesystem::FileSystem;
use crate::system::ProcessEnvironment;
use crate::utils::format_json;

/// Reads FILE line by line and prints it back as indented JSON.
pub fn run_jsondump<E, F>(env: &mut E, fs: F) -> i32
where
    E: ProcessEnvironment,
    F: FileSystem,
{
    let cli: JsonDumpCli = match parse(env) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let content = match fs.open(&cli.file).and_then(|mut stream| stream.read_to_end()) {
        Ok(content) => content,
        Err(e) => return report(env, &e),
    };

    match format_json(&content, cli.indent) {
        Ok(pretty) => emit(env, &pretty).err().unwrap_or(0),
        Err(e) => report(env, &e),
    }
}

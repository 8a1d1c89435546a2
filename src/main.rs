use scandir::commands::run_scandir;
use scandir::config::default_config_path;
use scandir::{logging, LocalFileSystem, ProcessEnvironment, StdEnvironment};

fn main() {
    logging::init();

    let mut env = StdEnvironment::new();
    let fallback = default_config_path();
    let code = run_scandir(&mut env, LocalFileSystem::new(), fallback.as_deref());
    env.exit(code);
}

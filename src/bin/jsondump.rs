use scandir::commands::run_jsondump;
use scandir::{logging, LocalFileSystem, ProcessEnvironment, StdEnvironment};

fn main() {
    logging::init();

    let mut env = StdEnvironment::new();
    let code = run_jsondump(&mut env, LocalFileSystem::new());
    env.exit(code);
}

use scandir::commands::run_args;
use scandir::{logging, ProcessEnvironment, StdEnvironment};

fn main() {
    logging::init();

    let mut env = StdEnvironment::new();
    let code = run_args(&mut env);
    env.exit(code);
}

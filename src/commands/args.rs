// src/commands/args.rs
use super::emit;
use crate::system::ProcessEnvironment;

pub const NO_ARGS_HINT: &str = "Try to pass some args when invoking this script!";

/// Echoes each argument as `index: value`, program name included.
pub fn run_args(env: &mut impl ProcessEnvironment) -> i32 {
    let args = env.args();
    if args.len() <= 1 {
        return emit(env, NO_ARGS_HINT).err().unwrap_or(0);
    }
    for (i, arg) in args.iter().enumerate() {
        if let Err(code) = emit(env, &format!("{}: {}", i, arg)) {
            return code;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::CapturedEnvironment;

    #[test]
    fn test_hint_without_args() {
        let mut env = CapturedEnvironment::new(["args"]);
        assert_eq!(run_args(&mut env), 0);
        assert_eq!(env.stdout, vec![NO_ARGS_HINT]);
    }

    #[test]
    fn test_echoes_with_index() {
        let mut env = CapturedEnvironment::new(["args", "one", "two words"]);
        run_args(&mut env);
        assert_eq!(env.stdout, vec!["0: args", "1: one", "2: two words"]);
    }

    #[test]
    fn test_stops_when_reader_leaves() {
        let mut env = CapturedEnvironment::new(["args", "a", "b", "c"]).with_stdout_limit(2);
        assert_eq!(run_args(&mut env), 0);
        assert_eq!(env.stdout, vec!["0: args", "1: a"]);
        assert!(env.stderr.is_empty());
    }
}

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: hero [--print-config] [FILE|DIR]...

  FILE|DIR        .mp3/.wav files or directories to put in the playlist
  --print-config  print the default config.toml and exit
  -h, --help      show this help";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(Vec<PathBuf>),
    PrintConfig,
    Help,
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Invocation {
    let mut inputs = Vec::new();
    let mut only_paths = false;
    for arg in args {
        if only_paths {
            inputs.push(PathBuf::from(arg));
            continue;
        }
        match arg.as_str() {
            "--print-config" => return Invocation::PrintConfig,
            "-h" | "--help" => return Invocation::Help,
            "--" => only_paths = true,
            _ => inputs.push(PathBuf::from(arg)),
        }
    }
    Invocation::Run(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn paths_are_collected_in_order() {
        assert_eq!(
            parse(args(&["a.mp3", "music"])),
            Invocation::Run(vec![PathBuf::from("a.mp3"), PathBuf::from("music")])
        );
        assert_eq!(parse(args(&[])), Invocation::Run(vec![]));
    }

    #[test]
    fn flags_win_and_double_dash_ends_them() {
        assert_eq!(parse(args(&["x.wav", "--print-config"])), Invocation::PrintConfig);
        assert_eq!(parse(args(&["-h"])), Invocation::Help);
        assert_eq!(
            parse(args(&["--", "--help"])),
            Invocation::Run(vec![PathBuf::from("--help")])
        );
    }
}

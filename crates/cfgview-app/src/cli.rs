use std::path::PathBuf;

use clap::Parser;

/// cfgview: live control-flow graph of a source file.
#[derive(Parser, Debug)]
#[command(name = "cfgview", version, about)]
pub struct Args {
    /// Source file to render.
    pub file: PathBuf,

    /// Language name override (e.g. "Python", "C/C++", "TypeScript JSX").
    /// Inferred from the file extension by default.
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Initial cursor offset into the file, in UTF-16 code units.
    #[arg(short = 'o', long, default_value_t = 0)]
    pub offset: usize,

    /// Directory holding the viewer page (`index.html` and its assets).
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// Settings file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable the engine's developer tools.
    #[arg(long)]
    pub devtools: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_only() {
        let args = Args::try_parse_from(["cfgview", "main.py"]).unwrap();
        assert_eq!(args.file, PathBuf::from("main.py"));
        assert_eq!(args.offset, 0);
        assert!(args.language.is_none());
        assert!(!args.devtools);
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "cfgview",
            "--language",
            "C/C++",
            "-o",
            "42",
            "--resources",
            "dist",
            "--config",
            "s.toml",
            "--log-level",
            "cfgview=debug",
            "--devtools",
            "a.c",
        ])
        .unwrap();
        assert_eq!(args.language.as_deref(), Some("C/C++"));
        assert_eq!(args.offset, 42);
        assert_eq!(args.resources, Some(PathBuf::from("dist")));
        assert_eq!(args.config, Some(PathBuf::from("s.toml")));
        assert_eq!(args.log_level.as_deref(), Some("cfgview=debug"));
        assert!(args.devtools);
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["cfgview"]).is_err());
    }

    #[test]
    fn negative_offset_is_rejected() {
        assert!(Args::try_parse_from(["cfgview", "-o", "-1", "a.py"]).is_err());
    }
}

//! Command-line configuration for the enigma binary.
//!
//! ```text
//! enigma [OPTIONS] CONFIG [INPUT [OUTPUT]]
//! ```
//!
//! INPUT defaults to stdin and OUTPUT to stdout. With `--sample N` the input
//! is generated instead of read, from a seed that is printed so the run can
//! be reproduced.

use std::path::PathBuf;

/// Resolved command-line options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // === Files ===
    /// Machine configuration file
    pub config_file: PathBuf,

    /// Message input (None = stdin)
    pub input_file: Option<PathBuf>,

    /// Converted output (None = stdout)
    pub output_file: Option<PathBuf>,

    // === Sample input ===
    /// Generate this many message symbols instead of reading INPUT
    pub sample_len: Option<usize>,

    /// Seed for sample generation
    pub seed: u64,

    // === Behavior ===
    /// Trace every keystroke and log at debug level
    pub verbose: bool,

    /// Print the metrics summary when done
    pub print_metrics: bool,

    /// `--help` was given; nothing else is meaningful
    pub show_help: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If `--seed` is absent the seed is taken from the clock.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut positional: Vec<PathBuf> = Vec::new();
        let mut seed: Option<u64> = None;
        let mut sample_len: Option<usize> = None;
        let mut verbose = false;
        let mut print_metrics = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--metrics" => {
                    print_metrics = true;
                }
                "--sample" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample requires a number".to_string());
                    }
                    sample_len = Some(args[i].parse().map_err(|_| "invalid sample length")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--help" | "-h" => {
                    return Ok(Self::help());
                }
                arg if arg.starts_with("--") => {
                    return Err(format!("unknown argument: {}", arg));
                }
                path => {
                    positional.push(PathBuf::from(path));
                }
            }
            i += 1;
        }

        if positional.len() > 3 {
            return Err(format!("too many arguments: {}", positional.len()));
        }
        let mut positional = positional.into_iter();
        let config_file = positional
            .next()
            .ok_or("missing configuration file argument")?;

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default()
        });

        Ok(Config {
            config_file,
            input_file: positional.next(),
            output_file: positional.next(),
            sample_len,
            seed,
            verbose,
            print_metrics,
            show_help: false,
        })
    }

    fn help() -> Self {
        Config {
            config_file: PathBuf::new(),
            input_file: None,
            output_file: None,
            sample_len: None,
            seed: 0,
            verbose: false,
            print_metrics: false,
            show_help: true,
        }
    }

    /// Print the configuration in human-readable form to stderr.
    pub fn print(&self) {
        let input = match (&self.sample_len, &self.input_file) {
            (Some(len), _) => format!("(sample of {} symbols, seed {})", len, self.seed),
            (None, Some(path)) => path.display().to_string(),
            (None, None) => "(stdin)".to_string(),
        };
        let output = self
            .output_file
            .as_ref()
            .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string());

        eprintln!("=== Configuration ===");
        eprintln!("Machine:     {}", self.config_file.display());
        eprintln!("Input:       {}", input);
        eprintln!("Output:      {}", output);
        eprintln!();
    }
}

pub fn print_help() {
    println!("enigma: Rotor cipher machine simulator");
    println!();
    println!("USAGE:");
    println!("    enigma [OPTIONS] CONFIG [INPUT [OUTPUT]]");
    println!();
    println!("ARGS:");
    println!("    CONFIG                  Machine description (alphabet, slots, rotors)");
    println!("    INPUT                   Setting lines and messages (default: stdin)");
    println!("    OUTPUT                  Converted messages (default: stdout)");
    println!();
    println!("OPTIONS:");
    println!("    --verbose, -v           Trace every keystroke to stderr");
    println!("    --metrics               Print a metrics summary to stderr");
    println!("    --sample <N>            Convert N random symbols instead of INPUT");
    println!("    --seed <N>              Random seed for --sample");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    enigma demos/default.conf demos/hiawatha.in");
    println!("    enigma --verbose demos/default.conf < message.in > message.out");
    println!("    enigma --sample 500 --seed 42 --metrics demos/default.conf");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_arguments() {
        let config = Config::from_args(&args(&["m.conf", "in.txt", "out.txt"])).unwrap();
        assert_eq!(config.config_file, PathBuf::from("m.conf"));
        assert_eq!(config.input_file, Some(PathBuf::from("in.txt")));
        assert_eq!(config.output_file, Some(PathBuf::from("out.txt")));
        assert!(!config.verbose);
        assert!(!config.print_metrics);

        let config = Config::from_args(&args(&["m.conf"])).unwrap();
        assert_eq!(config.input_file, None);
        assert_eq!(config.output_file, None);
    }

    #[test]
    fn test_flags() {
        let config = Config::from_args(&args(&[
            "--verbose", "--metrics", "--sample", "300", "--seed", "42", "m.conf",
        ]))
        .unwrap();
        assert!(config.verbose);
        assert!(config.print_metrics);
        assert_eq!(config.sample_len, Some(300));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_help() {
        let config = Config::from_args(&args(&["--help"])).unwrap();
        assert!(config.show_help);
        let config = Config::from_args(&args(&["m.conf", "-h"])).unwrap();
        assert!(config.show_help);
    }

    #[test]
    fn test_usage_errors() {
        assert!(Config::from_args(&[]).is_err());
        assert!(Config::from_args(&args(&["a", "b", "c", "d"])).is_err());
        assert!(Config::from_args(&args(&["--bogus", "m.conf"])).is_err());
        assert!(Config::from_args(&args(&["m.conf", "--seed"])).is_err());
        assert!(Config::from_args(&args(&["m.conf", "--sample", "lots"])).is_err());
    }
}

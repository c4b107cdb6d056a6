//! Command-line argument parsing for bellcheck

/// Parse command line arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub once: bool,
    pub validate: bool,
    pub list: bool,
    pub help: bool,
    /// Fixed instant ("YYYY-MM-DD HH:MM:SS") instead of the system clock
    pub at: Option<String>,
}

pub fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse from an explicit argument list; `args[0]` is the program name
pub fn parse_args_from(args: &[String]) -> Args {
    let mut result = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--once" => result.once = true,
            "--validate" => result.validate = true,
            "--list" => result.list = true,
            "--help" | "-h" => result.help = true,
            "--at" => {
                if i + 1 < args.len() {
                    i += 1;
                    result.at = Some(args[i].clone());
                    result.once = true; // A frozen clock would print the same line forever
                }
            }
            _ => {}
        }
        i += 1;
    }

    result
}

pub fn print_help() {
    println!("bellcheck - School bell schedule countdown\n");
    println!("USAGE:");
    println!("    bellcheck [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --once                  Print the current status once and exit");
    println!("    --at \"YYYY-MM-DD HH:MM:SS\"");
    println!("                            Resolve a fixed instant instead of now (implies --once)");
    println!("    --list                  List today's (or the next school day's) periods");
    println!("    --validate              Validate configuration and calendar data, then exit");
    println!("    --help, -h              Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    BELLCHECK_CALENDAR            Calendar JSON file (default ./calendars.json)");
    println!("    BELLCHECK_EXTRA_PERIODS       e.g. \"wed=seventh,thu=zero+seventh\"");
    println!("    BELLCHECK_EXTRA_PERIODS_FILE  JSON extra periods, re-read every second");
    println!("    BELLCHECK_CLOCK_OFFSET_SECS   Shift the clock by N seconds");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bellcheck")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_default() {
        assert_eq!(parse_args_from(&args(&[])), Args::default());
    }

    #[test]
    fn test_parse_args_flags() {
        let result = parse_args_from(&args(&["--once", "--validate", "--list"]));
        assert!(result.once);
        assert!(result.validate);
        assert!(result.list);
        assert!(!result.help);
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args_from(&args(&["--help"])).help);
        assert!(parse_args_from(&args(&["-h"])).help);
    }

    #[test]
    fn test_parse_args_at_implies_once() {
        let result = parse_args_from(&args(&["--at", "2025-09-02 07:23:00"]));
        assert_eq!(result.at.as_deref(), Some("2025-09-02 07:23:00"));
        assert!(result.once);
    }

    #[test]
    fn test_parse_args_at_without_value() {
        let result = parse_args_from(&args(&["--at"]));
        assert!(result.at.is_none());
        assert!(!result.once);
    }

    #[test]
    fn test_parse_args_unknown_ignored() {
        assert_eq!(parse_args_from(&args(&["--bogus", "x"])), Args::default());
    }
}

mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "aptlink", version, about = "APT controller protocol CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_subcommand() {
        let cli = Cli::try_parse_from([
            "aptlink",
            "query",
            "/dev/ttyUSB0",
            "MOT_REQ_VELPARAMS",
            "MOT_GET_VELPARAMS",
            "--param1",
            "1",
            "--timeout",
            "2s",
        ])
        .expect("query args should parse");

        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.param1, 1);
                assert_eq!(args.address.dest, 0x50);
                assert_eq!(args.timeout.as_deref(), Some("2s"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_params_with_payload_values() {
        let err = Cli::try_parse_from([
            "aptlink",
            "encode",
            "MOT_SET_POSCOUNTER",
            "1",
            "100",
            "--param1",
            "2",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_hex_addresses() {
        let cli = Cli::try_parse_from([
            "aptlink",
            "info",
            "/dev/ttyUSB0",
            "--dest",
            "0x21",
            "--timeout",
            "3s",
        ])
        .expect("info args should parse");
        match cli.command {
            Command::Info(args) => assert_eq!(args.dest, 0x21),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn encode_accepts_negative_values() {
        let cli = Cli::try_parse_from(["aptlink", "encode", "MOT_MOVE_RELATIVE", "1", "-200"])
            .expect("negative values should parse");
        assert!(matches!(cli.command, Command::Encode(_)));
    }
}

use clap::Parser;

mod commands;
mod output;

use commands::fix::{self, FixArgs};
use commands::GlobalArgs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "repackage")]
#[command(version = VERSION)]
#[command(about = "Rename a package namespace across a source tree")]
struct Cli {
    #[command(flatten)]
    fix: FixArgs,

    /// Print a JSON envelope instead of progress lines
    #[arg(long)]
    json: bool,

    /// Print the built-in configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.print_config {
        return match repackage::config::builtin_config_json() {
            Ok(json) => {
                println!("{}", json);
                std::process::ExitCode::SUCCESS
            }
            Err(err) => {
                output::print_human_error(&err);
                std::process::ExitCode::from(1)
            }
        };
    }

    let global = GlobalArgs { json: cli.json };
    let result = fix::run(cli.fix, &global);

    let exit_code = if global.json {
        let (json_result, exit_code) = output::map_cmd_result_to_json(result);
        if let Err(err) = output::print_json_result(json_result) {
            output::print_human_error(&err);
            return std::process::ExitCode::from(1);
        }
        exit_code
    } else {
        match result {
            Ok((_, exit_code)) => exit_code,
            Err(err) => {
                output::print_human_error(&err);
                output::exit_code_for_error(err.code)
            }
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

use matchfeed_core::{convert_32_to_64_str, convert_64_to_32_str};
use serde::Serialize;

use crate::commands::SteamIdDirection;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct SteamIdResult<'a> {
    input: &'a str,
    output: String,
}

pub fn steamid_cmd(direction: SteamIdDirection, output: OutputArgs) -> i32 {
    let (input, converted) = match &direction {
        SteamIdDirection::To64 { id } => (id.as_str(), convert_32_to_64_str(id)),
        SteamIdDirection::To32 { id } => (id.as_str(), convert_64_to_32_str(id)),
    };

    match converted {
        Ok(value) => {
            if output.format == OutputFormat::Text {
                if !output.quiet {
                    println!("{value}");
                }
            } else {
                print_result(output.format, output.quiet, &SteamIdResult { input, output: value });
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::VALIDATION_FAILED
        }
    }
}

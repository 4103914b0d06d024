use matchfeed_core::{build_replay_url, ReplayCompression};

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

pub fn replay_url_cmd(
    match_id: u64,
    cluster: u32,
    replay_salt: u64,
    environment: &str,
    output: OutputArgs,
) -> i32 {
    // Test fixtures are served uncompressed.
    let compression = if environment.eq_ignore_ascii_case("test") {
        ReplayCompression::None
    } else {
        ReplayCompression::Bzip2
    };
    let url = build_replay_url(match_id, cluster, replay_salt, compression);

    if output.format == OutputFormat::Text {
        if !output.quiet {
            println!("{url}");
        }
    } else {
        print_result(output.format, output.quiet, &serde_json::json!({ "url": url }));
    }
    exit_codes::SUCCESS
}

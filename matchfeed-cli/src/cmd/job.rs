use matchfeed_core::build_descriptor_str;
use serde::Serialize;

use crate::cmd::descriptor::report_build_error;
use crate::cmd::fetch::{execute, fetch_config, FetchResult};
use crate::config::load_payload;
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{ApiArgs, FetchArgs, OutputArgs, PayloadArgs};

#[derive(Serialize)]
struct JobResult {
    kind: String,
    title: String,
    #[serde(flatten)]
    fetched: FetchResult,
}

pub async fn job_cmd(
    kind: &str,
    payload: PayloadArgs,
    api: ApiArgs,
    fetch: FetchArgs,
    output: OutputArgs,
) -> i32 {
    let payload = match load_payload(&payload) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let descriptor = match build_descriptor_str(kind, payload) {
        Ok(d) => d,
        Err(e) => {
            report_build_error(&output, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    tracing::info!(kind = %descriptor.kind, title = %descriptor.title, "running job");
    let request = fetch_config(descriptor.url.clone(), &fetch);
    match execute(request.into(), &api, &fetch, descriptor.kind.is_api()).await {
        Ok(fetched) => {
            let result = JobResult {
                kind: descriptor.kind.to_string(),
                title: descriptor.title,
                fetched,
            };
            print_result(output.format, output.quiet, &result);
            exit_codes::SUCCESS
        }
        Err((code, message)) => {
            print_error(output.format, output.quiet, &message);
            code
        }
    }
}

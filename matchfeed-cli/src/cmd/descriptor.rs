use matchfeed_core::{build_descriptor_str, BuildError};

use crate::config::load_payload;
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{OutputArgs, PayloadArgs};

pub fn descriptor_cmd(kind: &str, payload: PayloadArgs, output: OutputArgs) -> i32 {
    let payload = match load_payload(&payload) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    match build_descriptor_str(kind, payload) {
        Ok(descriptor) => {
            print_result(output.format, output.quiet, &descriptor);
            exit_codes::SUCCESS
        }
        Err(e) => {
            report_build_error(&output, &e);
            exit_codes::VALIDATION_FAILED
        }
    }
}

pub(crate) fn report_build_error(output: &OutputArgs, err: &BuildError) {
    tracing::debug!(error = ?err, "descriptor rejected");
    print_error(output.format, output.quiet, &err.to_string());
}

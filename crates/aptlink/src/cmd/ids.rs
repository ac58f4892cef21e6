use aptlink_codec::MessageRegistry;

use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_ids, OutputFormat};

pub fn run(format: OutputFormat) -> CliResult<i32> {
    print_ids(MessageRegistry::global(), format);
    Ok(SUCCESS)
}

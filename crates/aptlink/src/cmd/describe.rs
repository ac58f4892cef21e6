use aptlink_codec::MessageRegistry;

use crate::cmd::{parse_message_id, DescribeArgs};
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_descriptor, OutputFormat};

pub fn run(args: DescribeArgs, format: OutputFormat) -> CliResult<i32> {
    let id = parse_message_id(&args.id)?;
    let desc = MessageRegistry::global()
        .lookup(id)
        .map_err(|err| codec_error("describe failed", err))?;
    print_descriptor(desc, format);
    Ok(SUCCESS)
}

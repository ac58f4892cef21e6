use aptlink_codec::MessageRegistry;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("aptlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: aptlink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("APTLINK_BUILD_TARGET").unwrap_or("unknown"));
    println!("profile: {}", option_env!("APTLINK_BUILD_PROFILE").unwrap_or("unknown"));
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "features: device={}, cli=true",
        cfg!(feature = "device")
    );
    println!("message_layouts: {}", MessageRegistry::global().len());

    Ok(SUCCESS)
}

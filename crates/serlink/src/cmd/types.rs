use serlink_registry::TypeRegistry;

use crate::cmd::TypesArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{print_types, OutputFormat};

pub fn run(args: TypesArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TypeRegistry::from_path(&args.registry)
        .map_err(|err| registry_error("catalog load failed", err))?;

    print_types(&registry, format);
    Ok(SUCCESS)
}

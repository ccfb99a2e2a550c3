//! Play command handler

use anyhow::Result;
use tracing::info;

use tuneframe::channel::OriginPolicy;
use tuneframe::logging::{self, LogTarget};
use tuneframe::player::{run_widget, HostPaths, WidgetExit, WidgetOptions};
use tuneframe::Config;

use crate::cli::PlayArgs;

/// Run the widget with `args` layered over the config file.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let target = config.log_file().map_or(LogTarget::Discard, LogTarget::File);
    logging::init(target)?;

    let options = widget_options(&config, &args);
    let host = HostPaths {
        input: args.host_in,
        output: args.host_out,
    };

    match run_widget(options, &host)? {
        WidgetExit::Quit => info!("quit by user"),
        WidgetExit::Signal => info!("stopped by signal"),
    }
    Ok(())
}

/// Widget options from config, overridden by command line flags.
pub fn widget_options(config: &Config, args: &PlayArgs) -> WidgetOptions {
    let mut options = WidgetOptions::from_config(config);
    if let Some(source) = &args.source {
        options.source = source.clone();
    }
    if let Some(origin) = &args.allowed_origin {
        options.origin_policy = OriginPolicy::parse(origin);
    }
    options.dev = args.dev;
    options
}

#[macro_use] extern crate clap;
#[macro_use] extern crate log;

use ecscat::*;
use clap::{Arg, App, AppSettings, SubCommand, ArgMatches};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process;

fn print_error_debug(e: &Error) {
    // unwind the error chain
    for e in e.iter().skip(1) {
        warn!("caused by: {}", e);
    }
}

fn main() {
    let app = App::new("ecscat")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Compile sidecars and reconcile app template versions")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"))
        .subcommand(SubCommand::with_name("compile")
            .about("Compile a workload's log router and sidecars into container definitions")
            .arg(Arg::with_name("workload")
                .required(true)
                .help("Path to the workload file"))
            .arg(Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output file to save to")))
        .subcommand(SubCommand::with_name("version")
            .about("Show the template version an app is effectively at")
            .arg(Arg::with_name("app")
                .required(true)
                .help("Application name"))
            .arg(Arg::with_name("metadata-dir")
                .long("metadata-dir")
                .takes_value(true)
                .default_value("metadata")
                .help("Directory with exported stack and stack set metadata")));

    // arg parse
    let args = app.get_matches();
    let name = args.subcommand_name().unwrap_or("ecscat").to_string();
    let _ = run(&args).map_err(|e| {
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn run(args: &ArgMatches) -> Result<()> {
    // always show INFO messages (+1)
    loggerv::Logger::new()
        .verbosity(args.occurrences_of("verbose") + 1)
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .unwrap();

    dispatch_commands(args)
}

fn dispatch_commands(args: &ArgMatches) -> Result<()> {
    if let Some(a) = args.subcommand_matches("compile") {
        let conf = Config::read()?;
        debug!("Logging to {} in {}", conf.logging.logGroup, conf.logging.region);
        let wl = Workload::read_from(Path::new(a.value_of("workload").unwrap()))?;
        wl.verify()?;
        let out = render::fragment(&wl.containers(&conf))?;
        if let Some(o) = a.value_of("output") {
            let mut f = File::create(o)?;
            write!(f, "{}", out)?;
            info!("Wrote container definitions for {} to {}", wl.name, o);
        } else {
            print!("{}", out);
        }
        return Ok(());
    }
    else if let Some(a) = args.subcommand_matches("version") {
        let provider = FileMetadata::new(a.value_of("metadata-dir").unwrap());
        let ver = reconcile::app_version(&provider, a.value_of("app").unwrap())?;
        println!("{}", ver);
        return Ok(());
    }

    unreachable!("Subcommand valid, but not implemented");
}

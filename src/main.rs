use std::path::PathBuf;

use assetkiln::SiteConfig;
use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("copy")
                .about("Copies a project's asset folder into a build directory")
                .arg(
                    Arg::new("source")
                        .help("The project root that holds the asset folder")
                        .required(true),
                )
                .arg(
                    Arg::new("destination")
                        .help("The build output directory")
                        .required(true),
                )
                .arg(
                    Arg::new("config")
                        .help("Path to a site.toml (defaults to <source>/site.toml)")
                        .short('c')
                        .long("config"),
                )
                .arg(
                    Arg::new("asset-folder")
                        .help("Overrides the asset folder name")
                        .long("asset-folder"),
                )
                .arg(
                    Arg::new("ignore-hidden")
                        .help("Skip hidden files and directories")
                        .long("ignore-hidden")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    init_logger(is_verbose);

    match matches.subcommand() {
        Some(("copy", args)) => handle_copy(args),
        _ => unreachable!(),
    }
}

fn init_logger(is_verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if is_verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    builder.init();
}

fn handle_copy(args: &ArgMatches) -> miette::Result<()> {
    let source = PathBuf::from(args.get_one::<String>("source").expect("source required"));
    let destination = PathBuf::from(
        args.get_one::<String>("destination")
            .expect("destination required"),
    );

    let mut config = match args.get_one::<String>("config") {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::load(&source)?,
    };

    if let Some(folder) = args.get_one::<String>("asset-folder") {
        config.asset.folder = folder.clone();
    }
    if args.get_flag("ignore-hidden") {
        config.asset.ignore_hidden = true;
    }

    let report = assetkiln::copy_site_assets(&source, &destination, &config)?;

    println!(
        "{} {} -> {} ({})",
        "copied".green(),
        source.join(config.asset_folder()).display(),
        destination.display(),
        report
    );

    Ok(())
}

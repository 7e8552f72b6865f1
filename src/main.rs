use clap::{Parser, Subcommand};
use mapa_riesgo::{config, data, render, report};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the interactive risk map HTML
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print the high-risk zones to the console
    Report {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            // 1. Load the boundary and the risk table
            let boundary = data::load_boundary(
                &app_config.input.boundary_shapefile,
                &app_config.input.region_name,
            )?;
            println!(
                "Loaded {} boundary polygon(s) for {}",
                boundary.len(),
                app_config.input.region_name
            );

            let observations = data::load_risk_table(
                &app_config.input.risk_csv,
                app_config.input.on_invalid_row,
            )?;
            println!("Loaded {} risk observations", observations.len());

            // 2. Build the map description
            let doc = render::build_map(&app_config.map, &boundary, &observations);

            // 3. Serialize to HTML
            render::write_html(&doc, &app_config.output.map_html)?;

            println!("Mapa actualizado");
        }
        Commands::Report { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            let observations = data::load_risk_table(
                &app_config.input.risk_csv,
                app_config.input.on_invalid_row,
            )?;

            report::print_high_risk(&observations, &mut io::stdout())?;
        }
    }

    Ok(())
}

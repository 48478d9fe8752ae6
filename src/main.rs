use billboard::models::RecordEdits;
use billboard::{
    Config, Database, Profile,
    cli::{Cli, Commands},
};
use clap::Parser;
use color_eyre::Result;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Initialize database (seeds blank numbered rows on first run)
    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
        config.seed_rows,
    )?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List {
            search,
            client,
            payment,
            contract,
            json,
        } => {
            billboard::cli::handle_list(search, client, payment, contract, json, &db)?;
        }
        Commands::Show { serial } => {
            billboard::cli::handle_show(serial, &db)?;
        }
        Commands::Edit {
            serial,
            billboard_id,
            location,
            size,
            client_name,
            company_name,
            contact_number,
            email,
            start_date,
            end_date,
            rent,
            advance,
            payment_status,
            contract_status,
            remarks,
            partner_share,
        } => {
            let edits = RecordEdits {
                billboard_id,
                location,
                size,
                client_name,
                company_name,
                contact_number,
                email,
                start_date,
                end_date,
                rent_amount: rent,
                advance_received: advance,
                payment_status,
                contract_status,
                remarks,
                partner_share,
            };
            billboard::cli::handle_edit(serial, edits, &db)?;
        }
        Commands::AttachImage { serial, file } => {
            billboard::cli::handle_attach_image(serial, file, &config, &db)?;
        }
        Commands::ExportCsv { output } => {
            billboard::cli::handle_export_csv(output, &db)?;
        }
        Commands::ImportCsv { input } => {
            billboard::cli::handle_import_csv(input, &db)?;
        }
        Commands::Archive { serial } => {
            billboard::cli::handle_archive(serial, &db)?;
        }
        Commands::ArchiveList => {
            billboard::cli::handle_archive_list(&db)?;
        }
        Commands::ArchiveClear => {
            billboard::cli::handle_archive_clear(&db)?;
        }
    }

    Ok(())
}

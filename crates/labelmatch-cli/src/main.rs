mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "labelmatch-cli")]
#[command(about = "Match order shipping addresses to carrier branches and localities")]
struct Cli {
    /// Catalog YAML file; overrides `LABELMATCH_CATALOG_PATH`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Annotate a JSON array of order records and print the batch report.
    Annotate {
        /// JSON file holding the records.
        #[arg(long)]
        records: PathBuf,
    },
    /// Print the branch and locality autocomplete lists.
    Catalog,
    /// Resolve a single pickup address against the branch catalog.
    Branch(AddressArgs),
    /// Resolve a single home-delivery address against the locality catalog.
    Locality(AddressArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct AddressArgs {
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    locality: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    province: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
}

impl AddressArgs {
    fn into_record(
        self,
        shipment_type: labelmatch_core::ShipmentType,
    ) -> labelmatch_core::RawAddressRecord {
        use labelmatch_core::Scalar;

        let mut record = labelmatch_core::RawAddressRecord::new(shipment_type);
        record.street = self.street.map(Scalar::Text);
        record.house_number = self.number.map(Scalar::Text);
        record.locality = self.locality.map(Scalar::Text);
        record.city = self.city.map(Scalar::Text);
        record.province = self.province.map(Scalar::Text);
        record.postal_code = self.postal_code.map(Scalar::Text);
        record
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = labelmatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.catalog.unwrap_or(config.catalog_path);
    tracing::debug!(env = %config.env, catalog = %catalog_path.display(), "loading catalog");
    let index = run::load_index(&catalog_path)?;

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Annotate { records } => run::annotate(&index, &records, &mut stdout),
        Commands::Catalog => run::catalog(&index, &mut stdout),
        Commands::Branch(args) => run::single(
            &index,
            &args.into_record(labelmatch_core::ShipmentType::Pickup),
            &mut stdout,
        ),
        Commands::Locality(args) => run::single(
            &index,
            &args.into_record(labelmatch_core::ShipmentType::HomeDelivery),
            &mut stdout,
        ),
    }
}

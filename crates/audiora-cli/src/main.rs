use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;

use audiora_cli::commands;
use audiora_cli::config::{self, AudioraConfig};
use audiora_core::models::impedance::ImpedanceMeasurement;
use audiora_core::models::report_format::ReportKind;
use audiora_core::numeric::Reading;

#[derive(Parser)]
#[command(name = "audiora", version)]
#[command(about = "Audiometry diagnosis, tympanogram classification and report export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Synchronize a saved session and print its derived fields
    Diagnose {
        session: PathBuf,

        /// Also store the synchronized session in the data directory
        #[arg(long)]
        save: bool,
    },

    /// Classify a single tympanogram peak
    Tymp {
        #[arg(long, allow_hyphen_values = true)]
        pressure: String,
        #[arg(long)]
        compliance: String,
        #[arg(long)]
        volume: String,
    },

    /// Print the sampled tympanogram curve as CSV
    Curve {
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        pressure: String,
        #[arg(long, default_value = "1.2")]
        compliance: String,
        #[arg(long, default_value = "1.0")]
        volume: String,
    },

    /// Export a report as DOCX (or rendered text for a `.md` path)
    Export {
        session: PathBuf,

        /// Output file (defaults to the session's report path in the data directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report kind (defaults from the session type)
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Name of a saved report format
        #[arg(long)]
        format: Option<String>,

        /// Patient record to print in the report
        #[arg(long)]
        patient: Option<PathBuf>,
    },

    /// View or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration
    Show,

    /// Update the audiologist profile printed on reports
    SetProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        reg_no: Option<String>,
        #[arg(long)]
        qualification: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },

    /// Set the letterhead printed in the page header
    SetHeader { text: String },

    /// Save a report format: the default sections minus `--off` ones
    AddFormat {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Section key to leave out (repeatable)
        #[arg(long = "off")]
        off: Vec<String>,
    },

    /// List the section keys of a report kind
    Sections {
        #[arg(value_enum)]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Puretone,
    Impedance,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Puretone => ReportKind::Puretone,
            KindArg::Impedance => ReportKind::Impedance,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Command::Diagnose { session, save } => {
            let session = commands::load_session(&session)?;
            print!("{}", commands::diagnose_report(&session));
            if save {
                let config = config::load_or_default(&config_path)?;
                commands::store_session(&data_dir(&config)?, &session)?;
            }
        }
        Command::Tymp {
            pressure,
            compliance,
            volume,
        } => {
            println!("{}", commands::tymp_report(&pressure, &compliance, &volume));
        }
        Command::Curve {
            pressure,
            compliance,
            volume,
        } => {
            let measurement = ImpedanceMeasurement {
                pressure: Reading::from(pressure.as_str()),
                volume: Reading::from(volume.as_str()),
                compliance: Reading::from(compliance.as_str()),
            };
            print!("{}", commands::curve_csv(&measurement));
        }
        Command::Export {
            session,
            out,
            kind,
            format,
            patient,
        } => {
            let config = config::load_or_default(&config_path)?;
            let session = commands::load_session(&session)?;
            let patient = patient.as_deref().map(commands::load_patient).transpose()?;
            let kind = kind
                .map(ReportKind::from)
                .unwrap_or_else(|| commands::default_kind(session.session_type));

            let path = match out {
                Some(path) => path,
                None => commands::report_path(
                    &data_dir(&config)?,
                    session.id,
                    kind,
                    commands::ReportOutput::Docx,
                ),
            };
            let output = commands::ReportOutput::for_path(&path);
            let bytes = commands::export_report(
                &session,
                kind,
                &config,
                format.as_deref(),
                patient.as_ref(),
                output,
            )?;
            commands::write_file(&path, &bytes)?;
            tracing::info!(path = %path.display(), kind = kind.as_str(), "report written");
        }
        Command::Config { action } => run_config(&config_path, action)?,
    }

    Ok(())
}

fn run_config(path: &std::path::Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = config::load_or_default(path)?;
            let summary = config::config_summary(path, &config);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ConfigAction::SetProfile {
            name,
            reg_no,
            qualification,
            phone_number,
            address,
        } => {
            let mut config = config::load_or_default(path)?;
            let profile = &mut config.audiologist;
            for (slot, value) in [
                (&mut profile.name, name),
                (&mut profile.reg_no, reg_no),
                (&mut profile.qualification, qualification),
                (&mut profile.phone_number, phone_number),
                (&mut profile.address, address),
            ] {
                if let Some(value) = value {
                    *slot = value.trim().to_string();
                }
            }
            config::save_config(path, &config)?;
        }
        ConfigAction::SetHeader { text } => {
            let mut config = config::load_or_default(path)?;
            let text = text.trim();
            config.styles.header_text = (!text.is_empty()).then(|| text.to_string());
            config::save_config(path, &config)?;
        }
        ConfigAction::AddFormat { name, kind, off } => {
            let mut config = config::load_or_default(path)?;
            let format = commands::format_with_sections_off(&name, kind.into(), &off)?;
            config.upsert_format(format);
            config::save_config(path, &config)?;
        }
        ConfigAction::Sections { kind } => {
            print!("{}", commands::section_listing(kind.into()));
        }
    }
    Ok(())
}

fn data_dir(config: &AudioraConfig) -> Result<PathBuf> {
    match &config.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => config::default_data_dir(),
    }
}

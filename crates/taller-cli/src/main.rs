//! Taller CLI - look up, edit and serve service tickets

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use taller::config::DEFAULT_CONFIG_PATH;
use taller::cost::format_amount;
use taller::credentials::{inspect_secrets, FindingLevel};
use taller::ticket::parse_case_number;
use taller::{Connection, EditForm, Status, TallerConfig, TicketEditor};
use taller_web::{AccessGate, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taller")]
#[command(author, version, about = "Service-ticket editor over a shared sheet")]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a ticket as the edit form would pre-fill it
    Lookup {
        /// Case number (`7` or `CASO-7`)
        caso: String,
    },

    /// Save a ticket, starting from its pre-filled form
    Save {
        /// Case number (`7` or `CASO-7`)
        caso: String,

        #[command(flatten)]
        edits: EditArgs,
    },

    /// Run the web form
    Serve {
        /// Listen address (default: from the configuration)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Check a secrets file for the service-account section
    CheckSecrets {
        /// Secrets file
        #[arg(default_value = ".streamlit/secrets.toml")]
        path: PathBuf,
    },

    /// List the repair stages in order
    Statuses,
}

/// Overrides applied on top of the pre-filled form
#[derive(Args)]
struct EditArgs {
    /// New status, by its label (see `taller statuses`)
    #[arg(long)]
    status: Option<String>,

    /// Internal parts value
    #[arg(long)]
    internal: Option<u64>,

    /// Internal parts description
    #[arg(long)]
    internal_desc: Option<String>,

    /// External parts value
    #[arg(long)]
    external: Option<u64>,

    /// External parts description
    #[arg(long)]
    external_desc: Option<String>,

    /// Maintenance labor
    #[arg(long)]
    maintenance: Option<u64>,

    /// Repair labor (pre-filled with the stored total)
    #[arg(long)]
    repair: Option<u64>,

    /// Replace the diagnosis text
    #[arg(long)]
    diagnosis: Option<String>,

    /// Work-performed note appended to the diagnosis
    #[arg(long)]
    note: Option<String>,

    /// Flag the row for customer notification
    #[arg(long)]
    notify: bool,
}

impl EditArgs {
    fn apply(self, form: &mut EditForm) -> Result<()> {
        let edits = &mut form.edits;
        if let Some(label) = self.status {
            edits.status = Status::from_label(&label)
                .ok_or_else(|| anyhow!("Unknown status '{label}' (see `taller statuses`)"))?;
        }
        if let Some(v) = self.internal {
            edits.costs.internal.value = v;
        }
        if let Some(d) = self.internal_desc {
            edits.costs.internal.description = d;
        }
        if let Some(v) = self.external {
            edits.costs.external.value = v;
        }
        if let Some(d) = self.external_desc {
            edits.costs.external.description = d;
        }
        if let Some(v) = self.maintenance {
            edits.costs.maintenance = v;
        }
        if let Some(v) = self.repair {
            edits.costs.repair = v;
        }
        if let Some(d) = self.diagnosis {
            edits.diagnosis = d;
        }
        if let Some(n) = self.note {
            edits.work_note = n;
        }
        edits.notify = self.notify;
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup { caso } => lookup(&cli.config, &caso),
        Commands::Save { caso, edits } => save(&cli.config, &caso, edits),
        Commands::Serve { bind } => serve(&cli.config, bind),
        Commands::CheckSecrets { path } => check_secrets(&path),
        Commands::Statuses => {
            for (i, status) in Status::ALL.iter().enumerate() {
                println!("{}\t{}", i + 1, status);
            }
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<TallerConfig> {
    TallerConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration '{}'", path.display()))
}

fn open_editor(config: &TallerConfig) -> Result<TicketEditor<Connection>> {
    let connection = Connection::open(config).context("Failed to connect to the ticket sheet")?;
    Ok(TicketEditor::new(connection, config.layout.clone()))
}

fn case_number(input: &str) -> Result<u32> {
    parse_case_number(input).ok_or_else(|| anyhow!("'{input}' is not a case number"))
}

fn lookup(config_path: &Path, caso: &str) -> Result<()> {
    let case = case_number(caso)?;
    let config = load_config(config_path)?;
    let editor = open_editor(&config)?;

    let form = editor.open_form(case)?;
    print_form(&form);
    Ok(())
}

fn save(config_path: &Path, caso: &str, args: EditArgs) -> Result<()> {
    let case = case_number(caso)?;
    let config = load_config(config_path)?;
    let mut editor = open_editor(&config)?;

    let mut form = editor.open_form(case)?;
    args.apply(&mut form)?;

    let (receipt, fresh) = editor
        .save_form(&form)
        .with_context(|| format!("Failed to save {}", form.ticket_id))?;

    println!(
        "Saved {} (row {}): total {}{}",
        receipt.ticket_id,
        receipt.row.get(),
        format_amount(receipt.total),
        if receipt.notified { ", flagged for notification" } else { "" }
    );
    println!();
    print_form(&EditForm::from_hit(&fresh));
    Ok(())
}

fn print_form(form: &EditForm) {
    println!("{} (row {})", form.ticket_id, form.row.get());
    for (label, value) in form.intake.display_rows() {
        println!("  {label}: {value}");
    }

    match &form.unrecognized_status {
        Some(stored) => println!("  Estado: {} (stored '{}' not recognized)", form.edits.status, stored),
        None => println!("  Estado: {}", form.edits.status),
    }
    if !form.current_parts_detail.is_empty() {
        println!("  Repuestos: {}", form.current_parts_detail);
    }
    println!("  Costo total: {}", format_amount(form.live_total()));

    if !form.edits.diagnosis.is_empty() {
        println!("  Informe:");
        for line in form.edits.diagnosis.lines() {
            println!("    {line}");
        }
    }
}

fn serve(config_path: &Path, bind: Option<String>) -> Result<()> {
    let config = load_config(config_path)?;
    let editor = open_editor(&config)?;
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());

    let state = AppState::new(editor, AccessGate::new(config.gate.passphrase.clone()))
        .with_confirm_seconds(config.server.confirm_seconds);

    info!("taller v{} starting", env!("CARGO_PKG_VERSION"));
    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    runtime.block_on(taller_web::run(state, &bind))?;
    Ok(())
}

fn check_secrets(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let report = inspect_secrets(&text);

    println!("{}", path.display());
    for finding in &report.findings {
        let mark = match finding.level {
            FindingLevel::Ok => "ok",
            FindingLevel::Info => "info",
            FindingLevel::Warning => "warn",
            FindingLevel::Error => "error",
        };
        println!("  [{mark}] {}", finding.message);
    }

    if report.has_errors() {
        bail!("secrets file '{}' is not usable", path.display());
    }
    Ok(())
}

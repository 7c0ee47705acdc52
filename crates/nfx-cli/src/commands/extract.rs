//! Extract command - pull structured data from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use nfx_core::{DocumentInput, ExtractionEngine, ExtractionOutcome, NfxConfig};
use nfx_inference::GeminiBackend;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON record
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        NfxConfig::from_file(Path::new(path))?
    } else {
        NfxConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let media_type = media_type_for(&args.input)?;
    let data = fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    info!("Extracting from {} ({})", args.input.display(), media_type);

    let model = args.model.unwrap_or_else(|| config.inference.model.clone());
    let backend = GeminiBackend::from_env(model.as_str())?
        .with_timeout(Duration::from_secs(config.inference.timeout_secs));
    let engine = ExtractionEngine::new(backend, config.extraction);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Querying {}...", model));

    let result = engine
        .extract(DocumentInput {
            filename,
            media_type,
            data,
        })
        .await;

    pb.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(failure) => {
            eprintln!("{} {}", style("✗").red(), failure);
            std::process::exit(1);
        }
    };

    for warning in &outcome.metadata.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome.record)?,
        OutputFormat::Text => format_text(&outcome),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    debug!(
        "Extraction took {}ms via {}",
        outcome.metadata.processing_time_ms, outcome.metadata.model
    );

    Ok(())
}

fn media_type_for(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok("application/pdf".to_string()),
        "txt" => Ok("text/plain".to_string()),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn format_text(outcome: &ExtractionOutcome) -> String {
    let record = &outcome.record;
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let mut output = String::new();

    output.push_str(&format!(
        "Invoice: {}\n",
        field(&record.numero_nota_fiscal)
    ));
    output.push_str(&format!(
        "Issued:  {}\n",
        record
            .data_emissao
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push('\n');

    output.push_str("Supplier:\n");
    output.push_str(&format!("  {}\n", field(&record.fornecedor.razao_social)));
    if let Some(fantasia) = &record.fornecedor.fantasia {
        output.push_str(&format!("  ({})\n", fantasia));
    }
    output.push_str(&format!("  CNPJ: {}\n", field(&record.fornecedor.cnpj)));
    output.push('\n');

    output.push_str("Billed to:\n");
    output.push_str(&format!("  {}\n", field(&record.faturado.nome_completo)));
    output.push_str(&format!("  CPF: {}\n", field(&record.faturado.cpf)));
    output.push('\n');

    if let Some(descricao) = &record.descricao_produtos {
        output.push_str(&format!("Items: {}\n", descricao));
    }

    output.push_str(&format!(
        "Total: {}\n",
        record
            .valor_total
            .map(|v| format!("R$ {}", v))
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!("Installments: {}\n", record.quantidade_parcelas));

    if let Some(due) = record.data_vencimento {
        output.push_str(&format!("Due: {}\n", due));
    }
    if let Some(category) = record.classificacao_despesa {
        output.push_str(&format!("Category: {}\n", category));
    }

    output
}

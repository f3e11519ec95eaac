//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use cs_02_transaction_encoder::{EncodeError, EncoderConfig, FieldPolicy, TransactionEncoder};
use cs_05_signer_sequence::DocumentTypeCatalog;
use shared_types::{get_selector_from_name, DocumentSubmission};

/// ChainSign chain-interaction tool
#[derive(Parser, Debug)]
#[command(name = "chainsign")]
#[command(about = "Watch and encode ChainSign document transactions")]
#[command(version)]
pub struct Cli {
    /// JSON-RPC endpoint (overrides CS_RPC_URL)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Contract address (overrides CS_CONTRACT_ADDRESS)
    #[arg(long, global = true)]
    pub contract: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stream contract events to the log until Ctrl+C
    Watch {
        /// Seconds between polls (overrides CS_POLL_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,

        /// First block to read on startup (overrides CS_START_BLOCK)
        #[arg(long)]
        from_block: Option<u64>,
    },

    /// Print `send_document` calldata, one felt per line
    Encode(EncodeArgs),

    /// Print the selector of an entry point or event name
    Selector {
        /// Entry point or event name, e.g. `send_document`
        name: String,
    },

    /// List the standard document types and their default sign flows
    Types,
}

/// Arguments of `chainsign encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Document title
    #[arg(long)]
    pub title: String,

    /// Document type id, e.g. `onboarding`
    #[arg(long)]
    pub doc_type: String,

    /// Signer wallet address, in signing order (repeatable)
    #[arg(long = "signer", required = true)]
    pub signers: Vec<String>,

    /// Content hash, e.g. an IPFS CID
    #[arg(long)]
    pub hash: String,

    /// Reject fields longer than 31 bytes instead of truncating
    #[arg(long)]
    pub strict: bool,
}

impl EncodeArgs {
    /// Encoder settings implied by the flags.
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            field_policy: if self.strict {
                FieldPolicy::Reject
            } else {
                FieldPolicy::Truncate
            },
        }
    }

    /// Submission described by the flags.
    pub fn submission(&self) -> DocumentSubmission {
        DocumentSubmission::new(
            self.title.clone(),
            self.doc_type.clone(),
            self.signers.clone(),
            self.hash.clone(),
        )
    }
}

/// Calldata as hex lines.
pub fn encode_lines(args: &EncodeArgs) -> Result<Vec<String>, EncodeError> {
    let encoder = TransactionEncoder::new(args.encoder_config());
    let calldata = encoder.encode_submission(&args.submission())?;
    Ok(calldata.iter().map(|felt| felt.to_hex()).collect())
}

/// Selector as hex.
pub fn selector_line(name: &str) -> String {
    get_selector_from_name(name).to_hex()
}

/// `id  title  [flow]` lines.
pub fn type_lines<C: DocumentTypeCatalog + ?Sized>(catalog: &C) -> Vec<String> {
    catalog
        .all()
        .into_iter()
        .map(|t| {
            format!(
                "{:<20} {:<28} {}",
                t.id,
                t.title,
                t.default_sign_flow.join(" -> ")
            )
        })
        .collect()
}

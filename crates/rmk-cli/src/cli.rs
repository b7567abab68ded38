use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `rmk` binary.
#[derive(Debug, Parser)]
#[command(name = "rmk", version, about = "Rowmark - resumable dataset labeling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage stored reviewer credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// List candidate datasets in the remote store
    Datasets,
    /// Label a dataset one record at a time
    Label(LabelArgs),
    /// Show labeling progress for a dataset
    Progress(DatasetArg),
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Show who is signed in
    Status,
    /// Store credentials obtained from the identity provider
    Set {
        /// Reviewer email
        #[arg(long)]
        email: String,
        /// Opaque credential token
        #[arg(long)]
        token: String,
    },
    /// Delete stored credentials
    Clear,
}

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Dataset name as shown by `rmk datasets`
    pub dataset: String,
}

#[derive(Debug, Args)]
pub struct DatasetArg {
    /// Dataset name as shown by `rmk datasets`
    pub dataset: String,
}

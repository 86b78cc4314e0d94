use clap::{Parser, Subcommand};
use std::path::PathBuf;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "surfview", version, about = "Display-descriptor tooling and viewer launcher")]
pub struct Cli {
    /// Show log output on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

///
/// Commands
///

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the external viewer on a reconstructed session.
    Launch {
        /// Session label to locate under the subjects directory.
        session_label: String,

        /// Directory holding reconstructed subjects (defaults to the
        /// system temp directory).
        #[arg(
            short = 's',
            long = "subjects_dir",
            visible_alias = "sd",
            env = "SUBJECTS_DIR"
        )]
        subjects_dir: Option<PathBuf>,

        /// Viewer executable to run.
        #[arg(long, default_value = "freeview")]
        viewer: String,
    },

    /// Load and validate descriptor documents.
    Check {
        /// Descriptor documents to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print a descriptor summary, one version's columns, or the JSON model.
    Show {
        /// Descriptor document to inspect.
        file: PathBuf,

        /// Print the column order of one display version.
        #[arg(long)]
        version: Option<String>,

        /// Emit the full model as JSON.
        #[arg(long, conflicts_with = "version")]
        json: bool,
    },
}

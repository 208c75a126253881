use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "post-composer", version, about = "Compose and submit Stoke List posts")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Print the form a stored post opens as
    Project {
        /// Post JSON as returned by the API
        post: PathBuf,
    },
    /// Validate a form and print its preview
    Preview {
        /// Form JSON
        form: PathBuf,
        /// Preview as an edit of this stored post
        #[arg(long, value_name = "POST_JSON")]
        edit: Option<PathBuf>,
    },
    /// Preview a form and submit it
    Submit {
        /// Form JSON
        form: PathBuf,
        /// Update the post with this id instead of creating one
        #[arg(long, value_name = "POST_ID")]
        edit: Option<String>,
        /// Submit to an in-memory backend instead of the API
        #[arg(long)]
        dry_run: bool,
    },
}

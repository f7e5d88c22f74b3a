use std::path::PathBuf;
use clap::Parser;

use crate::aligner::{Algorithm, ToolPaths};

#[derive(Parser, Debug)]
#[command(author, version, about = "Align protein sequences and explore the result in the terminal", long_about = None)]
pub struct Cli {
    /// FASTA file to align, or an aligned FASTA/Clustal file with --aligned (.gz accepted)
    #[arg(required_unless_present = "example")]
    pub input: Option<PathBuf>,
    /// Align the bundled globin example instead of an input file
    #[arg(long = "example", conflicts_with_all = ["input", "aligned"])]
    pub example: bool,
    /// Aligner to run on the input
    #[arg(short = 'a', long = "algorithm", value_enum, default_value_t = Algorithm::ClustalW)]
    pub algorithm: Algorithm,
    /// Input is already aligned; skip the external aligner
    #[arg(long = "aligned")]
    pub aligned: bool,
    /// Newick guide tree to show alongside an --aligned input
    #[arg(long = "tree", requires = "aligned")]
    pub tree: Option<PathBuf>,
    /// Directory the result files are exported to
    #[arg(short = 'o', long = "output", default_value = "msaview_results")]
    pub output: PathBuf,
    /// Export the results and print the plain alignment instead of opening the dashboard
    #[arg(long = "no-tui")]
    pub no_tui: bool,
    /// Reject guide trees with unbalanced parentheses
    #[arg(long = "strict-newick")]
    pub strict_newick: bool,
    #[arg(long = "clustalw-bin", env = "MSAVIEW_CLUSTALW")]
    pub clustalw_bin: Option<PathBuf>,
    #[arg(long = "muscle-bin", env = "MSAVIEW_MUSCLE")]
    pub muscle_bin: Option<PathBuf>,
    #[arg(long = "fasttree-bin", env = "MSAVIEW_FASTTREE")]
    pub fasttree_bin: Option<PathBuf>,
}

impl Cli {
    /// Tool locations, falling back to the platform defaults
    pub fn tool_paths(&self) -> ToolPaths {
        let defaults = ToolPaths::default();
        ToolPaths {
            clustalw: self.clustalw_bin.clone().unwrap_or(defaults.clustalw),
            muscle: self.muscle_bin.clone().unwrap_or(defaults.muscle),
            fasttree: self.fasttree_bin.clone().unwrap_or(defaults.fasttree),
        }
    }
}

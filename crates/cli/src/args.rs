use clap::{Args, Parser, Subcommand};
use vnshelf_core::maturity::{MaturitySelection, SexualLevel, ViolenceLevel};
use vnshelf_core::panels::ViewerSettings;
use vnshelf_core::spoiler::SpoilerLevel;

/// Command-line arguments for `vnshelf`.
#[derive(Parser, Debug)]
#[command(name = "vnshelf")]
#[command(about = "Browse catalog releases by month")]
#[command(version)]
pub struct Cli {
    /// Base URL of the catalog service (overrides CATALOG_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List titles released in a month or year
    List(ListArgs),
    /// Show one title with its classification panels
    Title(DetailArgs),
    /// Show one character with its traits and appearances
    Character(DetailArgs),
}

/// Thresholds shared by every subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub struct MaturityArgs {
    /// Sexual content threshold: safe, suggestive or explicit
    #[arg(long, default_value = "safe", env = "VNSHELF_SEXUAL")]
    pub sexual: SexualLevel,

    /// Violence threshold: tame, violent or brutal
    #[arg(long, default_value = "tame", env = "VNSHELF_VIOLENCE")]
    pub violence: ViolenceLevel,
}

impl MaturityArgs {
    pub fn selection(&self) -> MaturitySelection {
        MaturitySelection::new(self.sexual, self.violence)
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Four-digit year, or 00 for every year (default: current year)
    #[arg(long)]
    pub year: Option<String>,

    /// Two-digit month, or 00 for the whole year (default: current month)
    #[arg(long)]
    pub month: Option<String>,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Titles per page (overrides CATALOG_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<u32>,

    #[command(flatten)]
    pub maturity: MaturityArgs,
}

#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Catalog identifier, e.g. v17 or c1234
    pub id: String,

    /// Highest spoiler level to reveal: 0, 1 or 2
    #[arg(long, default_value = "0", env = "VNSHELF_SPOILER")]
    pub spoiler: SpoilerLevel,

    #[command(flatten)]
    pub maturity: MaturityArgs,
}

impl DetailArgs {
    pub fn viewer(&self) -> ViewerSettings {
        ViewerSettings::new(self.spoiler, self.maturity.selection())
    }
}

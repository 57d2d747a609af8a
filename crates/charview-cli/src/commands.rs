//! Commands enum and shared query arguments.

use clap::{Args, Subcommand};

use charview_core::{CatalogConfig, CharacterId, FilterField, FilterSet, SortField};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of characters as a table
    List {
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Show the details of a single character
    Show {
        /// Character ID
        id: CharacterId,
    },

    /// Browse the catalog interactively
    Browse {
        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Filters, page size and sort order shared by `list` and `browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Records per page (10, 20 and 50 are the usual choices)
    #[arg(short = 's', long = "page-size")]
    pub page_size: Option<u32>,

    /// Filter by name (substring match)
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by status (alive, dead, unknown)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by species
    #[arg(long)]
    pub species: Option<String>,

    /// Filter by gender
    #[arg(long)]
    pub gender: Option<String>,

    /// Sort the page by this column (id, name, status, species, gender, episodes)
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl QueryArgs {
    /// Filters the session starts with.
    pub fn filters(&self) -> FilterSet {
        let mut filters = FilterSet::cleared();
        for (field, value) in [
            (FilterField::Name, &self.name),
            (FilterField::Status, &self.status),
            (FilterField::Species, &self.species),
            (FilterField::Gender, &self.gender),
        ] {
            if let Some(value) = value {
                filters.set(field, value.as_str());
            }
        }
        filters
    }

    /// Catalog configuration with the requested page size applied.
    pub fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::default();
        match self.page_size {
            Some(size) => config.with_page_size(size),
            None => config,
        }
    }
}

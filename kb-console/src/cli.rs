//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kb_client::config::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(name = "kb-console")]
#[command(about = "Admin console for the knowledge-base platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// REST API root
    #[arg(long, global = true, env = "KB_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Directory holding the session and preferences
    #[arg(long, global = true, env = "KB_STORAGE_DIR", default_value = ".kb-console")]
    pub storage_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "KB_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Also write a daily rolling log file into this directory
    #[arg(long, global = true, env = "KB_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and cache the role's permissions
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "KB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the stored session
    Whoami,
    /// Exchange the refresh token for a new one
    Refresh,
    /// Change a password (no login needed)
    ChangePassword {
        #[arg(short, long)]
        username: String,
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Dashboard landing view
    Dashboard,
    /// Settings view: which admin sections are available
    Settings,
    /// Categories and subcategories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// User accounts
    #[command(subcommand)]
    User(UserCommand),
    /// Roles and their permissions
    #[command(subcommand)]
    Role(RoleCommand),
    /// Own profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Articles
    #[command(subcommand)]
    Article(ArticleCommand),
    /// Theme and language
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Browse the category icon catalogue
    Icons {
        /// Substring filter, case-insensitive
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CategoryFields {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Icon name from the catalogue, e.g. FaBook
    #[arg(short, long)]
    pub icon: Option<String>,
    /// Icon color, e.g. #23c686
    #[arg(short, long, default_value = "#000000")]
    pub color: String,
    /// public or private; new categories default to public, edits keep the current one
    #[arg(short, long)]
    pub status: Option<shared::models::Visibility>,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List,
    Show { id: i64 },
    Create(CategoryFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: CategoryFields,
    },
    Delete { id: i64 },
    /// Add a subcategory; it takes the parent's visibility
    SubAdd {
        category_id: i64,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    SubUpdate {
        category_id: i64,
        id: i64,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    SubDelete { category_id: i64, id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List {
        /// Username filter
        #[arg(short, long, default_value = "")]
        search: String,
    },
    Show { id: i64 },
    Create {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Role name
        #[arg(short, long)]
        role: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    Update {
        id: i64,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    Delete { id: i64 },
    Activate { id: i64 },
    Deactivate { id: i64 },
    SetRole {
        id: i64,
        /// Role name
        role: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    List,
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
    },
    Update {
        /// Current role name
        role: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
    },
    Delete { role: String },
    /// Permission matrix of a role
    Permissions { role: String },
    /// Replace a role's permissions with exactly the given names
    Grant {
        role: String,
        /// Permission names, e.g. view_home edit_category
        permissions: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<chrono::NaiveDate>,
        /// male, female or other
        #[arg(long)]
        gender: Option<shared::models::Gender>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ArticleCommand {
    List,
    Show { slug: String },
    /// Publish an editor document
    Create {
        #[arg(short, long)]
        title: String,
        /// Defaults to a slug of the title
        #[arg(long, default_value = "")]
        slug: String,
        /// Editor JSON document
        #[arg(long)]
        content: PathBuf,
        /// Rendered HTML body
        #[arg(long)]
        html: PathBuf,
        #[arg(long)]
        tag: Vec<String>,
        #[arg(long)]
        category_id: Option<i64>,
        #[arg(long)]
        subcategory_id: Option<i64>,
    },
    Delete { slug: String },
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    Show,
    Theme { theme: kb_client::Theme },
    Language { language: kb_client::Language },
}

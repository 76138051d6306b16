//! CLI domain: parse, route, output, and presentation only.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_batch_text, format_pillars_text, format_posts_text, format_section_heading,
    format_status,
};
pub use route::{RunContext, CLI_CLIENT};

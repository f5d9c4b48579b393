//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sbx.toml`:
//!
//! | Module     | TOML Section   | Purpose                           |
//! |------------|----------------|-----------------------------------|
//! | `paths`    | `[paths]`      | Content, static, template dirs    |
//! | `serve`    | `[serve]`      | HTTP server                       |
//! | `site`     | `[site]`       | Title and description             |
//! | `terminal` | `[terminal]`   | Terminal widget                   |

mod paths;
mod serve;
mod site;
mod terminal;

pub use paths::PathsConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use terminal::TerminalConfig;

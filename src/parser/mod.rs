//! Parser layer
//! - traits.rs: SourceParser trait definition
//! - types.rs: Common types (DeclaredVersion, SourceType)
//! - version_json.rs: _version.json parser
//! - recipe_yaml.rs: recipe.yaml parser
//! - version_module.rs: __version__ attribute parser

pub mod recipe_yaml;
pub mod traits;
pub mod types;
pub mod version_json;
pub mod version_module;

pub use recipe_yaml::RecipeYamlParser;
pub use traits::{ParseError, SourceParser};
pub use types::{DeclaredVersion, SourceType};
pub use version_json::VersionJsonParser;
pub use version_module::VersionModuleParser;

//! Import extraction and dependency resolution.
//!
//! Raw import names are pulled out of source text by an [`ImportExtractor`]
//! and then narrowed to the identifiers of known modules. Anything that does
//! not name a known module (system frameworks, third-party packages) is
//! dropped without comment.
//!
//! # Example
//!
//! ```rust
//! use modscope::resolver::{resolve_dependencies, ImportExtractor, LexicalImportExtractor};
//!
//! let source = "import Foundation\nimport WalletCore\n";
//! let imports = LexicalImportExtractor::new().extract(source);
//!
//! let deps = resolve_dependencies(["WalletCore", "UIHome"], &imports);
//! assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec!["WalletCore"]);
//! ```

mod imports;

pub use imports::{
    extract_imports, extract_module_imports, resolve_dependencies, resolve_modules, ImportExtractor,
    LexicalImportExtractor,
};

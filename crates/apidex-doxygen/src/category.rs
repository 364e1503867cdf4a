//! Search data categories and the symbol kinds they map to.
//!
//! Doxygen splits its search index into one file family per category, named
//! `<category>_<n>.js` (`functions_8.js`, `enumvalues_a.js`).

use apidex_index::SymbolKind;

/// Categories that are not read: `all` repeats every other category, the rest are not
/// declarations.
pub const SKIPPED_CATEGORIES: [&str; 5] = ["all", "files", "pages", "groups", "searchdata"];

/// Page name prefixes of compound pages whose functions are members.
const COMPOUND_PAGE_PREFIXES: [&str; 3] = ["class", "struct", "union"];

/// A search data category that contributes declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `classes`
    Classes,
    /// `structs`
    Structs,
    /// `unions`
    Unions,
    /// `typedefs`
    Typedefs,
    /// `enums`
    Enums,
    /// `functions`
    Functions,
    /// `related` (friends and related functions)
    Related,
    /// `variables`
    Variables,
    /// `enumvalues`
    EnumValues,
    /// `defines`
    Defines,
    /// `namespaces`
    Namespaces,
}

/// How a file in a search directory is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass<'a> {
    /// A data file of a category that is read.
    Indexed(Category),
    /// A data file of a category that is deliberately ignored.
    Skipped(&'a str),
    /// A data file of a category this importer does not know.
    Unknown(&'a str),
    /// Not a search data file (`search.js`, `search.css`, HTML shells).
    NotData,
}

impl Category {
    /// Parses a category name.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "classes" => Self::Classes,
            "structs" => Self::Structs,
            "unions" => Self::Unions,
            "typedefs" => Self::Typedefs,
            "enums" => Self::Enums,
            "functions" => Self::Functions,
            "related" => Self::Related,
            "variables" => Self::Variables,
            "enumvalues" => Self::EnumValues,
            "defines" => Self::Defines,
            "namespaces" => Self::Namespaces,
            _ => return None,
        })
    }

    /// Kind of a declaration of this category documented on `page_id`.
    pub fn kind(self, page_id: &str) -> SymbolKind {
        match self {
            Self::Classes | Self::Structs | Self::Unions | Self::Typedefs | Self::Enums => {
                SymbolKind::Type
            }
            Self::Functions | Self::Related if is_compound_page(page_id) => SymbolKind::Member,
            Self::Functions | Self::Related => SymbolKind::Function,
            Self::Variables => SymbolKind::Member,
            Self::EnumValues | Self::Defines => SymbolKind::Constant,
            Self::Namespaces => SymbolKind::Namespace,
        }
    }

    /// Returns true if unparenthesized scope text names the declaration itself rather
    /// than its enclosing scope.
    pub fn scope_names_declaration(self) -> bool {
        matches!(
            self,
            Self::Classes
                | Self::Structs
                | Self::Unions
                | Self::Typedefs
                | Self::Enums
                | Self::Namespaces
        )
    }
}

/// Classifies a file name found in a search directory.
pub fn classify_file(file_name: &str) -> FileClass<'_> {
    let Some(stem) = file_name.strip_suffix(".js") else {
        return FileClass::NotData;
    };
    let Some((name, suffix)) = stem.rsplit_once('_') else {
        return FileClass::NotData;
    };
    if name.is_empty() || suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return FileClass::NotData;
    }

    if SKIPPED_CATEGORIES.contains(&name) {
        return FileClass::Skipped(name);
    }
    match Category::parse(name) {
        Some(category) => FileClass::Indexed(category),
        None => FileClass::Unknown(name),
    }
}

/// Returns true if a page documents a class, struct, or union.
fn is_compound_page(page_id: &str) -> bool {
    COMPOUND_PAGE_PREFIXES
        .iter()
        .any(|prefix| page_id.starts_with(prefix))
}

//! Language-specific analyzer implementations.

mod c_family;
mod python;

pub use c_family::CFamilyAnalyzer;
pub use python::PythonAnalyzer;

use once_cell::sync::OnceCell;

use super::StructureAnalyzer;
use crate::language::Language;

/// Static storage for Python analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

/// Static storage for the shared C/C++ analyzer.
static C_FAMILY_ANALYZER: OnceCell<CFamilyAnalyzer> = OnceCell::new();

/// Get the analyzer for a language.
pub fn get_analyzer(language: Language) -> &'static dyn StructureAnalyzer {
    match language {
        Language::Python => PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new),
        Language::C | Language::Cpp => C_FAMILY_ANALYZER.get_or_init(CFamilyAnalyzer::new),
    }
}

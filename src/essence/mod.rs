//! Essence ability tables: extraction from `.tsx` sources, Markdown rendering,
//! regeneration of the sources from edited documents, and the checks run
//! against the generated documents.

mod document;
mod error;
mod extract;
mod fixup;
mod generate;
mod markdown;
mod paths;
mod record;
mod render;
mod tier;
mod verify;

pub use document::{build_document, capitalize, convert_essence, write_document, ConversionSummary, TierBuckets};
pub use error::EssenceError;
pub use extract::{extract, extract_section, parse_object_block, parse_object_blocks};
pub use fixup::{fix_apostrophes, unescape_apostrophes, FileFix, FixReport};
pub use generate::{
    document_essences, escape_string, generate_essence, generate_tsx, write_tsx, GenerationSummary,
};
pub use markdown::parse_markdown;
pub use paths::{markdown_files, EssencePaths, DEFAULT_ESSENCES, INPUT_DIR, OUTPUT_DIR};
pub use record::{
    AbilityRecord, EssenceSections, RecordBuilder, SectionKind, DEFAULT_FLAG, RECOGNIZED_KEYS,
};
pub use render::render;
pub use tier::{Tier, DEFAULT_TIER};
pub use verify::{compare_sections, verify_essence, Drift, VerifyReport};
